//! dictpack-cli - Command-line interface for dictpack
//!
//! Compresses and decompresses files using the framed dictpack stream format.

use clap::{Parser, Subcommand};
use dictpack::{
    decode_bytes, encode_bytes_with_config, BitPacker, BitUnpacker, DictionaryConfig, Encoder,
    EncodedStream, FrameHeader, PackWidth, UnpackWidth, DEFAULT_CULL_TARGET, MAX_CAPACITY,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "dictpack-cli")]
#[command(about = "A CLI tool for adaptive dictionary compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Number of dictionary ids available before a cull
        #[arg(short, long, default_value_t = MAX_CAPACITY)]
        capacity: u16,

        /// Minimum number of entries a cull removes
        #[arg(long, default_value_t = DEFAULT_CULL_TARGET)]
        cull_target: usize,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a dictpack file
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },

    /// Run the built-in bit-packing and round-trip checks
    SelfTest,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            capacity,
            cull_target,
            force,
        } => DictionaryConfig::new(capacity, cull_target)
            .map_err(Box::<dyn std::error::Error>::from)
            .and_then(|config| {
                compress_file(&input, &output, config, force, cli.verbose, cli.quiet)
            }),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
        Commands::SelfTest => run_self_test(cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_paths(input: &Path, output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    Ok(())
}

fn progress_bar(size: usize, quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet || size <= 1024 * 1024 {
        return None;
    }

    let pb = ProgressBar::new(2);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message);
    pb.inc(1);
    Some(pb)
}

fn compress_file(
    input: &Path,
    output: &Path,
    config: DictionaryConfig,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!(
            "Capacity: {}, Cull target: {}",
            config.capacity, config.cull_target
        );
    }

    let start_time = Instant::now();

    let input_data = fs::read(input)?;
    let input_size = input_data.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Compressing...");

    let compressed_data = encode_bytes_with_config(&input_data, config)
        .map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    fs::write(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let output_size = compressed_data.len();
    let compression_ratio = if input_size > 0 {
        (output_size as f64 / input_size as f64) * 100.0
    } else {
        0.0
    };

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", compression_time);

        if compression_ratio > 100.0 {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Decompressing...");

    let decompressed_data =
        decode_bytes(&compressed_data).map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    fs::write(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();
    let output_size = decompressed_data.len();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        if output_size > 0 {
            println!(
                "  Ratio:  {:.1}%",
                (input_size as f64 / output_size as f64) * 100.0
            );
        }
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let header = FrameHeader::parse(&data)?;

    println!("dictpack File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());
    println!("  Source Length: {} bytes", header.source_len);
    println!("  Stream Bits: {}", header.bit_len);
    println!("  Padding Bits: {}", header.padding_bits());
    println!("  Capacity: {}", header.config.capacity);
    println!("  Cull Target: {}", header.config.cull_target);

    if verbose {
        println!("  Header bytes: {}", format_hex(&header.to_bytes()));
    }

    let stream = EncodedStream::from_frame(&data)?;
    let mut decoder = dictpack::Decoder::new();
    match decoder.decode(&stream) {
        Ok(_) => {
            let stats = decoder.stats();
            println!("  Literals: {}", stats.literal_count);
            println!("  References: {}", stats.reference_count);
            println!("  Culls: {}", stats.evictions);
            println!("  Status: ✓ Valid dictpack file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted dictpack file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}

fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Eight literal groups pack into exactly nine bytes and read back unchanged
fn check_literal_groups() -> dictpack::error::Result<bool> {
    let input = [0xDE, 0xAD, 0xBE, 0xEF, 0xDE, 0xAD, 0xBE, 0x0A];

    let mut packer = BitPacker::new();
    for &byte in &input {
        packer.pack(PackWidth::Literal, (byte as u32) << 1);
    }
    if packer.residue_len() != 0 {
        return Ok(false);
    }
    let packed = packer.finish();
    if packed.len() != 9 {
        return Ok(false);
    }

    let mut unpacker = BitUnpacker::new(&packed);
    for &byte in &input {
        let flag = unpacker.unpack(UnpackWidth::Flag)?;
        let value = unpacker.unpack(UnpackWidth::Byte)?;
        if flag != 0 || value != byte as u32 {
            return Ok(false);
        }
    }

    Ok(unpacker.remaining_bits() == 0)
}

/// Eight 17-bit groups read back as flag and 16-bit payload
fn check_reference_groups() -> dictpack::error::Result<bool> {
    let mut packer = BitPacker::new();
    for i in 0..8u32 {
        packer.pack(PackWidth::Reference, (i * 7) << 1);
    }
    if packer.residue_len() != 0 {
        return Ok(false);
    }
    let packed = packer.finish();

    let mut unpacker = BitUnpacker::new(&packed);
    for i in 0..8u32 {
        let flag = unpacker.unpack(UnpackWidth::Flag)?;
        let value = unpacker.unpack(UnpackWidth::Word)?;
        if flag != 0 || value != i * 7 {
            return Ok(false);
        }
    }

    Ok(unpacker.remaining_bits() == 0)
}

/// A repetitive sample compresses and decodes back to itself
fn check_round_trip() -> dictpack::error::Result<bool> {
    let sample: Vec<u8> = b"the quick brown fox jumps over the lazy dog; "
        .iter()
        .cycle()
        .take(4096)
        .copied()
        .collect();

    let mut encoder = Encoder::new(DictionaryConfig::default())?;
    let stream = encoder.encode(&sample)?;
    let restored = dictpack::decode_stream(&stream)?;

    Ok(restored == sample && encoder.stats().reference_count > 0)
}

fn run_self_test(quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let checks: [(&str, fn() -> dictpack::error::Result<bool>); 3] = [
        ("literal groups (9 bytes, no residue)", check_literal_groups),
        ("reference groups (17-bit round trip)", check_reference_groups),
        ("encode/decode round trip", check_round_trip),
    ];

    let mut failures = 0;
    for (name, check) in checks {
        let passed = match check() {
            Ok(passed) => passed,
            Err(e) => {
                log::error!("{}: {}", name, e);
                false
            }
        };

        if !passed {
            failures += 1;
        }
        if !quiet || !passed {
            println!("{}: {}", name, if passed { "PASSED" } else { "FAILED" });
        }
    }

    if failures > 0 {
        return Err(format!("{} self-test check(s) failed", failures).into());
    }

    Ok(())
}
