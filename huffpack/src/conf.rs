use std::path::PathBuf;
use clap::{Parser, ValueEnum};

use crate::CodecOptions;

/// Suffix appended to the input path to get the default output path.
pub const OUTPUT_SUFFIX: &str = ".out";

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Compress input to output
    Compress,
    /// Decompress input (produced by compress) to output
    Decompress
}

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
/// Byte-oriented Huffman compressor and decompressor.
pub struct Conf {
    /// Path to the input file
    #[arg(short = 'i', long = "input-file")]
    pub input: PathBuf,

    /// Path to the output file [default: input file path with .out appended]
    #[arg(short = 'o', long = "output-file")]
    pub output: Option<PathBuf>,

    /// Whether to compress or decompress the input
    #[arg(short = 'm', long, value_enum)]
    pub mode: Mode,

    /// Size (in bytes) of the buffer used to read input
    #[arg(long, default_value_t = CodecOptions::DEFAULT_READ_BUFFER)]
    pub read_buffer: usize,

    /// Size (in bytes) of the buffer used to write encoded output
    #[arg(long, default_value_t = CodecOptions::DEFAULT_WRITE_BUFFER)]
    pub write_buffer: usize,

    /// Number of decoded bytes collected before they are written
    #[arg(long, default_value_t = CodecOptions::DEFAULT_CHUNK)]
    pub chunk: usize,

    /// Do not print progress messages
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,

    /// Log level, used if RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String
}

impl Conf {
    /// Constructs configuration with default output path and buffer sizes.
    pub fn new(input: impl Into<PathBuf>, mode: Mode) -> Self {
        let options = CodecOptions::default();
        Self {
            input: input.into(),
            output: None,
            mode,
            read_buffer: options.read_buffer,
            write_buffer: options.write_buffer,
            chunk: options.chunk,
            quiet: false,
            log_level: "warn".to_owned()
        }
    }

    /// Sets the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Returns the output path: the one given or the input path followed by [`OUTPUT_SUFFIX`].
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None => {
                let mut path = self.input.clone().into_os_string();
                path.push(OUTPUT_SUFFIX);
                path.into()
            }
        }
    }

    /// Returns the buffer sizes.
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions { read_buffer: self.read_buffer, write_buffer: self.write_buffer, chunk: self.chunk }
    }
}
