//! EncodeWriter - file-like compression boundary
//!
//! Collects everything written to it and encodes the whole buffer when
//! finished, writing a single frame to the inner writer. The codec works on
//! one in-memory buffer, so nothing reaches the inner writer before `finish`.

use super::Encoder;
use crate::{CodecStats, DictionaryConfig, Result};
use std::io::Write;

/// Buffering compression writer implementing Write trait
#[derive(Debug)]
pub struct EncodeWriter<W: Write> {
    writer: Option<W>,
    encoder: Encoder,
    input_buffer: Vec<u8>,
    finished: bool,
}

impl<W: Write> EncodeWriter<W> {
    /// Create a new EncodeWriter
    pub fn new(writer: W, config: DictionaryConfig) -> Result<Self> {
        Ok(Self {
            writer: Some(writer),
            encoder: Encoder::new(config)?,
            input_buffer: Vec::new(),
            finished: false,
        })
    }

    /// Number of bytes buffered so far
    pub fn buffered_len(&self) -> usize {
        self.input_buffer.len()
    }

    /// Statistics of the completed pass (empty until `finish`)
    pub fn stats(&self) -> &CodecStats {
        self.encoder.stats()
    }

    /// Encode the buffered input, write the frame and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.write_frame()?;
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| std::io::Error::other("writer already taken"))?;
        writer.flush()?;
        Ok(writer)
    }

    fn write_frame(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }

        let stream = self.encoder.encode(&self.input_buffer)?;
        if let Some(writer) = self.writer.as_mut() {
            writer.write_all(&stream.to_frame())?;
        }

        self.input_buffer = Vec::new();
        self.finished = true;
        Ok(())
    }
}

impl<W: Write> Write for EncodeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.finished {
            return Err(std::io::Error::other("write after finish"));
        }
        self.input_buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        // The frame needs the whole input, so there is nothing to push yet
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for EncodeWriter<W> {
    fn drop(&mut self) {
        if !self.finished {
            // Try to finish compression, but ignore errors in drop
            let _ = self.write_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_bytes;

    #[test]
    fn test_chunked_writes_match_one_shot() {
        let data = b"the cat sat on the mat with the hat";
        let one_shot = crate::encode_bytes(data).unwrap();

        let mut writer = EncodeWriter::new(Vec::new(), DictionaryConfig::default()).unwrap();
        for chunk in data.chunks(4) {
            writer.write_all(chunk).unwrap();
        }
        assert_eq!(writer.buffered_len(), data.len());
        let output = writer.finish().unwrap();

        assert_eq!(output, one_shot);
        assert_eq!(decode_bytes(&output).unwrap(), data);
    }

    #[test]
    fn test_drop_writes_frame() {
        let mut output = Vec::new();
        {
            let mut writer = EncodeWriter::new(&mut output, DictionaryConfig::default()).unwrap();
            writer.write_all(b"dropped").unwrap();
        }
        assert_eq!(decode_bytes(&output).unwrap(), b"dropped");
    }

    #[test]
    fn test_empty_writer_still_frames() {
        let writer = EncodeWriter::new(Vec::new(), DictionaryConfig::default()).unwrap();
        let output = writer.finish().unwrap();
        assert_eq!(output.len(), crate::frame::FRAME_HEADER_LEN);
        assert!(decode_bytes(&output).unwrap().is_empty());
    }
}
