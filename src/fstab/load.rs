use crate::device::DeviceResolver;
use crate::filter::{Filter, MountMatchTarget};
use crate::fsutil::{self, unescape_octal};
use crate::table::{MountEntry, MountTable};

use super::parser::parse_fstab_line;
use super::{Error, Result};
use std::io::BufRead;
use std::path::Path;

pub const DEFAULT_FSTAB_PATH: &str = "/etc/fstab";

/// Reads the declared mounts from an fstab file.
///
/// Device specs such as `UUID=...` are resolved through `resolver`. Entries are matched against
/// `filter` by mount point and kept keyed by device; a later line for the same device replaces
/// an earlier one.
///
/// # Errors
///
/// - [`Error::FileOpen`] if the file can't be opened.
/// - [`Error::ReadLine`] if reading from the file fails.
/// - [`Error::Parse`] if a non-comment line has fewer than three fields.
pub fn load_declared_mounts(
    path: impl AsRef<Path>,
    filter: &Filter,
    resolver: &DeviceResolver,
) -> Result<MountTable> {
    let path = path.as_ref();
    log::debug!("Reading declared mounts from `{}`", path.display());
    let buf = fsutil::open_file_reader(path)?;

    load_declared_mounts_from_reader(buf, path, filter, resolver)
}

/// Reads declared mounts from any buffered reader in fstab format.
///
/// `origin` is only used in error messages.
///
/// # Errors
///
/// - [`Error::ReadLine`] if reading a line fails.
/// - [`Error::Parse`] if a line fails to parse.
pub fn load_declared_mounts_from_reader<R: BufRead>(
    mut reader: R,
    origin: &Path,
    filter: &Filter,
    resolver: &DeviceResolver,
) -> Result<MountTable> {
    let mut line = String::with_capacity(256);
    let mut line_no = 0;
    let mut table = MountTable::new();

    while reader
        .read_line(&mut line)
        .map_err(|source| Error::ReadLine {
            path: origin.to_path_buf(),
            source,
        })?
        != 0
    {
        line_no += 1;
        let parsed = parse_fstab_line(line.as_str()).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            line: line_no,
            source,
        })?;

        if let Some(entry) = parsed {
            let mount_point = unescape_octal(entry.mount_point);
            if filter.includes(entry.fs_type, &mount_point, MountMatchTarget::MountPoint) {
                let device = unescape_octal(entry.device);
                let device = resolver.resolve(&device).into_owned();
                table.insert(MountEntry::new(device, mount_point, entry.fs_type));
            } else {
                log::trace!(
                    "Skipping fstab entry `{}` ({}) excluded by filter",
                    mount_point,
                    entry.fs_type
                );
            }
        }

        line.clear();
    }

    log::debug!(
        "Found {} declared mounts in `{}`",
        table.len(),
        origin.display()
    );
    Ok(table)
}
