//! Sluice CLI - streaming gzip/bzip2 decompression.
//!
//! Reads a compressed file (or stdin) in fixed-size chunks, pushes each
//! chunk through the streaming decoder, and writes every output window to
//! the destination as soon as it is produced. Memory stays bounded by one
//! window no matter how large the stream is.

use clap::{Parser, ValueEnum};
use log::info;
use sluice_core::{DEFAULT_WINDOW_SIZE, Method, OutputChunk, Result as SluiceResult};
use sluice_decode::{DecoderConfig, ProcessStatus, StreamDecoder};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Size of compressed chunks read from the input.
const READ_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Parser)]
#[command(name = "sluice")]
#[command(author, version, about = "Streaming gzip/bzip2 decompressor")]
#[command(long_about = "
Decompress a gzip or bzip2 stream, forwarding output in bounded windows.

Examples:
  sluice archive.tar.gz -o archive.tar
  sluice logs.bz2 -o logs
  cat data.gz | sluice - > data
  sluice --method bzip2 --multi-stream parts.bz2 -o parts
")]
struct Cli {
    /// Compressed input file ("-" for stdin)
    input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decompression method (inferred from the input extension when omitted)
    #[arg(short, long, value_enum)]
    method: Option<MethodArg>,

    /// Output window size in bytes
    #[arg(short = 'w', long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Decode concatenated stream members instead of stopping at the first
    #[arg(long)]
    multi_stream: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Decompression method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// DEFLATE in the gzip container
    #[value(alias = "zlib")]
    Gzip,
    /// Burrows-Wheeler in the bzip2 container
    #[value(alias = "bzlib")]
    Bzip2,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Gzip => Method::Gzip,
            MethodArg::Bzip2 => Method::Bzip2,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let method = cli
        .method
        .map(Method::from)
        .unwrap_or_else(|| infer_method(&cli.input));

    let config = DecoderConfig::new(method)
        .with_window_size(cli.window_size)
        .with_multi_stream(cli.multi_stream)
        .with_verbose(cli.verbose);
    let mut decoder = StreamDecoder::open(config)?;

    let mut reader: Box<dyn Read> = if cli.input == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        Box::new(File::open(&cli.input)?)
    };
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut written = 0u64;
    let mut finished = false;
    let mut buf = vec![0u8; READ_CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }

        let mut sink = |chunk: OutputChunk| -> SluiceResult<()> {
            written += chunk.len() as u64;
            writer.write_all(chunk.data())?;
            Ok(())
        };
        match decoder.process(&buf[..n], &mut sink)? {
            ProcessStatus::StreamEnd => {
                finished = true;
                break;
            }
            ProcessStatus::Drained => {}
        }
    }

    writer.flush()?;

    // In multi-stream mode the decoder stays ready between members, so
    // plain end of input is the normal way to stop.
    if !finished && !cli.multi_stream {
        return Err("unexpected end of input: compressed stream is truncated".into());
    }

    info!("decompressed {written} bytes ({method})");
    Ok(())
}

/// Map the input extension to a method. This is a filename convention,
/// not content detection; `--method` overrides it.
fn infer_method(input: &Path) -> Method {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("gz" | "gzip") => Method::Gzip,
        Some("bz2" | "bzip2") => Method::Bzip2,
        _ => Method::default(),
    }
}
