#![doc = include_str!("../README.md")]

mod error;
pub use error::{Error, Result};
mod header;
pub use header::FileHeader;
mod codec;
pub use codec::{compress, decompress, CodecOptions, Stats};
mod conf;
pub use conf::{Conf, Mode, OUTPUT_SUFFIX};
mod file;
pub use file::{compress_file, decompress_file, run};
mod ui;
pub use ui::{ConsoleUi, QuietUi, Ui};
