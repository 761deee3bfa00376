//! Compression and decompression of files.

use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::{compress, decompress, Conf, Error, Mode, Result, Stats, Ui};

/// Opens the input file, failing with [`Error::InputMissingOrEmpty`] if it cannot be read or is empty.
fn open_input(path: &Path) -> Result<File> {
    let missing = || Error::InputMissingOrEmpty { path: path.to_owned() };
    let file = File::open(path).map_err(|_| missing())?;
    let metadata = file.metadata().map_err(|_| missing())?;
    if !metadata.is_file() || metadata.len() == 0 { return Err(missing()); }
    debug!(path = %path.display(), len = metadata.len(), "input opened");
    Ok(file)
}

/// Creates (or truncates) the output file, failing with [`Error::OutputUnwritable`].
fn create_output(path: &Path) -> Result<File> {
    File::create(path).map_err(|source| Error::OutputUnwritable { path: path.to_owned(), source })
}

/// Compresses `conf.input` to `conf.output_path()`, reporting progress to `ui`.
pub fn compress_file(conf: &Conf, ui: &dyn Ui) -> Result<Stats> {
    let output_path = conf.output_path();
    let mut input = open_input(&conf.input)?;
    ui.write_message("Starting compression...");
    ui.write_message(&format!("Output file: {}", output_path.display()));
    let mut output = create_output(&output_path)?;
    let stats = compress(&mut input, &mut output, &conf.codec_options(), ui)?;
    ui.write_message("Compression finished");
    Ok(stats)
}

/// Decompresses `conf.input` to `conf.output_path()`, reporting progress to `ui`.
///
/// On failure, the bytes decoded so far are left in the output file.
pub fn decompress_file(conf: &Conf, ui: &dyn Ui) -> Result<Stats> {
    let output_path = conf.output_path();
    let mut input = open_input(&conf.input)?;
    ui.write_message("Starting decompression...");
    ui.write_message(&format!("Output file: {}", output_path.display()));
    let mut output = create_output(&output_path)?;
    let stats = decompress(&mut input, &mut output, &conf.codec_options(), ui)?;
    ui.write_message("Decompression finished");
    Ok(stats)
}

/// Compresses or decompresses, depending on `conf.mode`.
pub fn run(conf: &Conf, ui: &dyn Ui) -> Result<Stats> {
    match conf.mode {
        Mode::Compress => compress_file(conf, ui),
        Mode::Decompress => decompress_file(conf, ui)
    }
}
