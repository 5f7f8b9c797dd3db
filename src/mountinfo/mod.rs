//! Reading the kernel's table of active mounts.
mod error;
mod load;
mod parser;

pub use error::{Error, Result};
pub use load::{DEFAULT_MOUNTINFO_PATH, load_active_mounts, load_active_mounts_from_reader};
pub use parser::{MountInfo, MountInfoField, ParseError, parse_mount_info_line};
