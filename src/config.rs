//! Run configuration.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::event::DEFAULT_AGENT_ADDR;
use crate::filter::{FilterSpec, MountMatchTarget};
use crate::fstab::DEFAULT_FSTAB_PATH;
use crate::mountinfo::DEFAULT_MOUNTINFO_PATH;

/// Everything a single run needs, built once at start-up and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub filter: FilterSpec,
    /// Handler names attached to every event.
    pub handlers: Vec<String>,
    /// Report problems as warnings instead of critical failures.
    pub warn: bool,
    /// Print events to stdout instead of sending them.
    pub dryrun: bool,
    /// Directory treated as `/` when locating system files.
    pub rootfs: PathBuf,
    pub fstab_path: PathBuf,
    pub mountinfo_path: PathBuf,
    pub agent_addr: SocketAddr,
    /// What the exact `mount`/`ignore_mount` lists match against for active mounts.
    pub active_mount_match: MountMatchTarget,
    pub resolve_devices: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: FilterSpec::default(),
            handlers: Vec::new(),
            warn: false,
            dryrun: false,
            rootfs: PathBuf::from("/"),
            fstab_path: PathBuf::from(DEFAULT_FSTAB_PATH),
            mountinfo_path: PathBuf::from(DEFAULT_MOUNTINFO_PATH),
            agent_addr: DEFAULT_AGENT_ADDR,
            active_mount_match: MountMatchTarget::FsType,
            resolve_devices: true,
        }
    }
}

impl Config {
    pub fn fstab_location(&self) -> PathBuf {
        under_root(&self.rootfs, &self.fstab_path)
    }

    pub fn mountinfo_location(&self) -> PathBuf {
        under_root(&self.rootfs, &self.mountinfo_path)
    }
}

fn under_root(rootfs: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix("/") {
        Ok(relative) => rootfs.join(relative),
        Err(_) => rootfs.join(path),
    }
}
