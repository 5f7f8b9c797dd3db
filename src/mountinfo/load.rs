use crate::device::DeviceResolver;
use crate::filter::{Filter, MountMatchTarget};
use crate::fsutil::{self, unescape_octal};
use crate::table::{MountEntry, MountTable};

use super::parser::parse_mount_info_line;
use super::{Error, Result};
use std::io::BufRead;
use std::path::Path;

/// Mount table of the current process, as seen by the kernel.
pub const DEFAULT_MOUNTINFO_PATH: &str = "/proc/self/mountinfo";

/// Device name used for mounts without a source, as `/proc/mounts` reports them.
const EMPTY_SOURCE_DEVICE: &str = "none";

/// Reads the active mounts from a Linux `mountinfo` file.
///
/// Every mount is keyed by its source device (normalized through `resolver`) and kept only if
/// `filter` includes it. `target` selects what the exact `mount`/`ignore_mount` lists are
/// compared against.
///
/// # Errors
///
/// - [`Error::FileOpen`] if the file can't be opened.
/// - [`Error::ReadLine`] if reading from the file fails.
/// - [`Error::Parse`] if parsing any line fails.
///
/// # Example
///
/// ```no_run
/// use check_fsmounts::device::DeviceResolver;
/// use check_fsmounts::filter::{FilterSpec, MountMatchTarget};
/// use check_fsmounts::mountinfo::load_active_mounts;
///
/// let filter = FilterSpec::default().compile().unwrap();
/// let active = load_active_mounts(
///     "/proc/self/mountinfo",
///     &filter,
///     MountMatchTarget::FsType,
///     &DeviceResolver::new("/"),
/// )
/// .unwrap();
/// println!("{} active mounts", active.len());
/// ```
pub fn load_active_mounts(
    path: impl AsRef<Path>,
    filter: &Filter,
    target: MountMatchTarget,
    resolver: &DeviceResolver,
) -> Result<MountTable> {
    let path = path.as_ref();
    log::debug!("Reading active mounts from `{}`", path.display());
    let buf = fsutil::open_file_reader(path)?;

    load_active_mounts_from_reader(buf, path, filter, target, resolver)
}

/// Reads active mounts from any buffered reader in `mountinfo` format.
///
/// `origin` is only used in error messages.
///
/// # Errors
///
/// - [`Error::ReadLine`] if reading a line fails.
/// - [`Error::Parse`] if a line fails to parse.
pub fn load_active_mounts_from_reader<R: BufRead>(
    mut reader: R,
    origin: &Path,
    filter: &Filter,
    target: MountMatchTarget,
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
        if line.trim().is_empty() {
            line.clear();
            continue;
        }

        let mount_info = parse_mount_info_line(line.as_str()).map_err(|source| Error::Parse {
            path: origin.to_path_buf(),
            line: line_no,
            source,
        })?;
        let mount_point = unescape_octal(mount_info.mount_point);

        if filter.includes(mount_info.fs_type, &mount_point, target) {
            let source = match mount_info.source {
                "" => EMPTY_SOURCE_DEVICE,
                source => source,
            };
            let device = resolver.resolve(source);
            let entry = MountEntry::new(device, mount_point, mount_info.fs_type);
            if let Some(previous) = table.insert(entry) {
                log::debug!(
                    "Device `{}` is mounted more than once, replacing mount point `{}`",
                    previous.device,
                    previous.mount_point
                );
            }
        } else {
            log::trace!(
                "Skipping active mount `{}` ({}) excluded by filter",
                mount_point,
                mount_info.fs_type
            );
        }

        line.clear();
    }

    log::debug!("Found {} active mounts in `{}`", table.len(), origin.display());
    Ok(table)
}
