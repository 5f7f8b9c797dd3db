//! Reading the static mount table (`/etc/fstab`).
mod error;
mod load;
mod parser;

pub use error::{Error, Result};
pub use load::{DEFAULT_FSTAB_PATH, load_declared_mounts, load_declared_mounts_from_reader};
pub use parser::{FstabEntry, FstabField, ParseError, parse_fstab_line};
