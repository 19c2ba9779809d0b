//! DecodeReader - file-like decompression boundary
//!
//! Reads the complete frame from the inner reader on first use, decodes it
//! in one pass and then serves the decoded bytes through `Read`.

use super::Decoder;
use crate::frame::EncodedStream;
use crate::{CodecStats, Result};
use std::io::Read;

/// Buffering decompression reader implementing Read trait
#[derive(Debug)]
pub struct DecodeReader<R: Read> {
    reader: R,
    decoder: Decoder,
    decoded: bool,
    output_buffer: Vec<u8>,
    output_pos: usize,
}

impl<R: Read> DecodeReader<R> {
    /// Create a new DecodeReader
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            reader,
            decoder: Decoder::new(),
            decoded: false,
            output_buffer: Vec::new(),
            output_pos: 0,
        })
    }

    /// Statistics of the completed pass (empty until the first read)
    pub fn stats(&self) -> &CodecStats {
        self.decoder.stats()
    }

    /// Read the whole frame and decode it
    fn decode_all(&mut self) -> Result<()> {
        if self.decoded {
            return Ok(());
        }

        let mut frame = Vec::new();
        self.reader.read_to_end(&mut frame)?;
        let stream = EncodedStream::from_frame(&frame)?;

        self.output_buffer = self.decoder.decode(&stream)?;
        self.output_pos = 0;
        self.decoded = true;
        Ok(())
    }
}

impl<R: Read> Read for DecodeReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if !self.decoded {
            self.decode_all()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        }

        let available = self.output_buffer.len() - self.output_pos;
        let to_copy = buf.len().min(available);
        buf[..to_copy]
            .copy_from_slice(&self.output_buffer[self.output_pos..self.output_pos + to_copy]);
        self.output_pos += to_copy;

        Ok(to_copy)
    }
}
