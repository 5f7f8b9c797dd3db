use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

use crate::config::Config;
use crate::event::DEFAULT_AGENT_ADDR;
use crate::filter::{FilterSpec, MountMatchTarget};
use crate::fstab::DEFAULT_FSTAB_PATH;
use crate::mountinfo::DEFAULT_MOUNTINFO_PATH;
use crate::status::Status;

/// Compares /etc/fstab against the currently mounted filesystems and reports every mismatch
/// as a monitoring event.
#[derive(Debug, Parser)]
#[command(name = "check-fsmounts")]
#[command(version)]
pub struct Args {
    /// Comma separated list of file system type(s) (default: all)
    #[arg(long, value_name = "TYPE", value_delimiter = ',')]
    pub fstype: Vec<String>,

    /// Comma separated list of file system type(s) to ignore
    #[arg(long, value_name = "TYPE", value_delimiter = ',')]
    pub ignore_fstype: Vec<String>,

    /// Comma separated list of mount point(s) (default: all)
    #[arg(long, value_name = "MOUNTPOINT", value_delimiter = ',')]
    pub mount: Vec<String>,

    /// Comma separated list of mount point(s) (regex)
    #[arg(long, value_name = "MOUNTPOINT", value_delimiter = ',')]
    pub mount_regex: Vec<String>,

    /// Comma separated list of mount point(s) to ignore
    #[arg(long, value_name = "MOUNTPOINT", value_delimiter = ',')]
    pub ignore_mount: Vec<String>,

    /// Comma separated list of mount point(s) to ignore (regex)
    #[arg(long, value_name = "MOUNTPOINT", value_delimiter = ',')]
    pub ignore_mount_regex: Vec<String>,

    /// Comma separated list of handlers
    #[arg(long, value_name = "HANDLER", value_delimiter = ',')]
    pub handlers: Vec<String>,

    /// Warn instead of throwing a critical failure
    #[arg(short, long)]
    pub warn: bool,

    /// Do not send events to the client socket, print them instead
    #[arg(long)]
    pub dryrun: bool,

    /// Match --mount and --ignore-mount against the mount point of active mounts
    /// instead of their file system type
    #[arg(long)]
    pub strict_mount_filter: bool,

    /// Compare device names as written instead of resolving UUID=/LABEL= and symlinks
    #[arg(long)]
    pub no_resolve_devices: bool,

    /// Static mount table to check
    #[arg(long, value_name = "PATH", default_value = DEFAULT_FSTAB_PATH)]
    pub fstab: PathBuf,

    /// Kernel mount table to check against
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MOUNTINFO_PATH)]
    pub mountinfo: PathBuf,

    /// Host root file system, when running inside a container
    #[arg(long, value_name = "PATH", env = "ROOTFS_MOUNT_PATH", default_value = "/")]
    pub rootfs: PathBuf,

    /// Client socket of the monitoring agent
    #[arg(long, value_name = "ADDR", default_value_t = DEFAULT_AGENT_ADDR)]
    pub socket: SocketAddr,
}

impl Args {
    pub fn into_config(self) -> Config {
        Config {
            filter: FilterSpec {
                fstype: without_empty(self.fstype),
                ignore_fstype: without_empty(self.ignore_fstype),
                mount: without_empty(self.mount),
                mount_regex: without_empty(self.mount_regex),
                ignore_mount: without_empty(self.ignore_mount),
                ignore_mount_regex: without_empty(self.ignore_mount_regex),
            },
            handlers: without_empty(self.handlers),
            warn: self.warn,
            dryrun: self.dryrun,
            rootfs: self.rootfs,
            fstab_path: self.fstab,
            mountinfo_path: self.mountinfo,
            agent_addr: self.socket,
            active_mount_match: if self.strict_mount_filter {
                MountMatchTarget::MountPoint
            } else {
                MountMatchTarget::FsType
            },
            resolve_devices: !self.no_resolve_devices,
        }
    }
}

/// Status to exit with when the command line is not a regular invocation.
///
/// `--help` and `--version` succeed. Every other parse failure is reported as
/// [`Status::Unknown`] so the scheduler does not mistake it for a mount mismatch.
pub fn parse_error_status(kind: ErrorKind) -> Status {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Status::Ok,
        _ => Status::Unknown,
    }
}

// `--fstype ext4,` yields a trailing empty item that would otherwise match nothing.
fn without_empty(items: Vec<String>) -> Vec<String> {
    items.into_iter().filter(|item| !item.is_empty()).collect()
}
