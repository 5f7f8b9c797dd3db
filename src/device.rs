//! Normalization of device specifications.
//!
//! fstab may name a device by tag (`UUID=...`, `LABEL=...`, `PARTUUID=...`, `PARTLABEL=...`)
//! or by a path that is itself a symlink (`/dev/mapper/vg-root`), while the kernel reports
//! whatever node it mounted. Both sides are run through [`DeviceResolver`] so that they agree
//! on a single name per block device.
use std::borrow::Cow;
use std::path::{Path, PathBuf};

const TAG_DIRECTORIES: [(&str, &str); 4] = [
    ("UUID", "dev/disk/by-uuid"),
    ("LABEL", "dev/disk/by-label"),
    ("PARTUUID", "dev/disk/by-partuuid"),
    ("PARTLABEL", "dev/disk/by-partlabel"),
];

#[derive(Debug, Clone)]
pub struct DeviceResolver {
    root: PathBuf,
    enabled: bool,
}

impl DeviceResolver {
    /// Creates a resolver that looks up device nodes below `root` (usually `/`).
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
        Self {
            root,
            enabled: true,
        }
    }

    /// Creates a resolver that returns every spec unchanged.
    pub fn disabled() -> Self {
        Self {
            root: PathBuf::from("/"),
            enabled: false,
        }
    }

    /// Resolves a device spec to the canonical device path, relative to the resolver root.
    ///
    /// Specs that are neither a known tag nor a `/dev/` path (e.g. `tmpfs`, `server:/export`)
    /// and specs that cannot be resolved are returned as given.
    pub fn resolve<'a>(&self, spec: &'a str) -> Cow<'a, str> {
        if !self.enabled {
            return Cow::Borrowed(spec);
        }

        let Some(candidate) = self.candidate_path(spec) else {
            return Cow::Borrowed(spec);
        };

        match std::fs::canonicalize(&candidate) {
            Ok(resolved) => {
                let resolved = match resolved.strip_prefix(&self.root) {
                    Ok(relative) => Path::new("/").join(relative),
                    Err(_) => resolved,
                };
                let resolved = resolved.to_string_lossy().into_owned();
                if resolved != spec {
                    log::debug!("Resolved device `{}` to `{}`", spec, resolved);
                }
                Cow::Owned(resolved)
            }
            Err(err) => {
                log::debug!(
                    "Could not resolve device `{}` via `{}`: {}",
                    spec,
                    candidate.display(),
                    err
                );
                Cow::Borrowed(spec)
            }
        }
    }

    fn candidate_path(&self, spec: &str) -> Option<PathBuf> {
        if let Some((tag, value)) = spec.split_once('=').filter(|_| !spec.starts_with('/')) {
            let value = value.trim_matches('"');
            return TAG_DIRECTORIES
                .iter()
                .find(|(name, _)| *name == tag)
                .filter(|_| !value.is_empty() && !value.contains('/'))
                .map(|(_, dir)| self.root.join(dir).join(value));
        }

        spec.strip_prefix("/dev/")
            .map(|rest| self.root.join("dev").join(rest))
    }
}
