//! Include/exclude filtering of mount entries.
//!
//! A [`FilterSpec`] holds the raw lists given on the command line. It is compiled once into a
//! [`Filter`], which both mount table loaders consult for every candidate entry.
//!
//! Rules are evaluated in a fixed order and the first exclusion wins:
//!
//! 1. `ignore_fstype` contains the fs type
//! 2. `fstype` is non-empty and does not contain the fs type
//! 3. `ignore_mount` contains the exact-match target
//! 4. any `ignore_mount_regex` pattern matches the mount point
//! 5. `mount` is non-empty and does not contain the exact-match target
//! 6. `mount_regex` is non-empty and no pattern matches the mount point
//!
//! Regex patterns are unanchored: a pattern matches if it occurs anywhere in the mount point.
mod error;

use regex::Regex;

pub use error::{Error, Result};

/// The field that the exact `mount` and `ignore_mount` lists are compared against.
///
/// The live mount loader historically compared these lists against the filesystem type rather
/// than the mount point. [`MountMatchTarget::FsType`] keeps that behavior for the active
/// table, [`MountMatchTarget::MountPoint`] gives the behavior the option names suggest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MountMatchTarget {
    #[default]
    MountPoint,
    FsType,
}

/// Raw, uncompiled filter lists. Empty lists impose no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub fstype: Vec<String>,
    pub ignore_fstype: Vec<String>,
    pub mount: Vec<String>,
    pub mount_regex: Vec<String>,
    pub ignore_mount: Vec<String>,
    pub ignore_mount_regex: Vec<String>,
}

impl FilterSpec {
    /// Compiles the regex lists and returns a ready-to-use [`Filter`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegex`] for the first pattern that fails to compile.
    pub fn compile(&self) -> Result<Filter> {
        Ok(Filter {
            fstype: self.fstype.clone(),
            ignore_fstype: self.ignore_fstype.clone(),
            mount: self.mount.clone(),
            mount_regex: compile_patterns("mount-regex", &self.mount_regex)?,
            ignore_mount: self.ignore_mount.clone(),
            ignore_mount_regex: compile_patterns("ignore-mount-regex", &self.ignore_mount_regex)?,
        })
    }
}

fn compile_patterns(option: &'static str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| Error::InvalidRegex {
                option,
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

/// A compiled [`FilterSpec`].
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fstype: Vec<String>,
    ignore_fstype: Vec<String>,
    mount: Vec<String>,
    mount_regex: Vec<Regex>,
    ignore_mount: Vec<String>,
    ignore_mount_regex: Vec<Regex>,
}

impl Filter {
    /// Returns `true` if an entry with the given fs type and mount point passes every rule.
    ///
    /// `target` selects what the exact `mount`/`ignore_mount` lists are compared against.
    pub fn includes(&self, fs_type: &str, mount_point: &str, target: MountMatchTarget) -> bool {
        let exact = match target {
            MountMatchTarget::MountPoint => mount_point,
            MountMatchTarget::FsType => fs_type,
        };

        if contains(&self.ignore_fstype, fs_type) {
            return false;
        }
        if !self.fstype.is_empty() && !contains(&self.fstype, fs_type) {
            return false;
        }
        if contains(&self.ignore_mount, exact) {
            return false;
        }
        if self.ignore_mount_regex.iter().any(|re| re.is_match(mount_point)) {
            return false;
        }
        if !self.mount.is_empty() && !contains(&self.mount, exact) {
            return false;
        }
        if !self.mount_regex.is_empty() && !self.mount_regex.iter().any(|re| re.is_match(mount_point))
        {
            return false;
        }

        true
    }
}

fn contains(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn includes(spec: &FilterSpec, fs_type: &str, mount_point: &str) -> bool {
        spec.compile()
            .unwrap()
            .includes(fs_type, mount_point, MountMatchTarget::MountPoint)
    }

    #[test]
    fn empty_spec_includes_everything() {
        let spec = FilterSpec::default();
        assert!(includes(&spec, "ext4", "/"));
        assert!(includes(&spec, "tmpfs", "/run"));
    }

    #[test]
    fn ignore_fstype_excludes() {
        let spec = FilterSpec {
            ignore_fstype: strings(&["tmpfs", "proc"]),
            ..Default::default()
        };
        assert!(!includes(&spec, "tmpfs", "/run"));
        assert!(includes(&spec, "ext4", "/"));
    }

    #[test]
    fn fstype_requires_membership() {
        let spec = FilterSpec {
            fstype: strings(&["ext4", "xfs"]),
            ..Default::default()
        };
        assert!(includes(&spec, "xfs", "/data"));
        assert!(!includes(&spec, "btrfs", "/data"));
    }

    #[test]
    fn ignore_fstype_wins_over_fstype() {
        let spec = FilterSpec {
            fstype: strings(&["ext4"]),
            ignore_fstype: strings(&["ext4"]),
            ..Default::default()
        };
        assert!(!includes(&spec, "ext4", "/"));
    }

    #[test]
    fn ignore_mount_excludes_exact_mount_point() {
        let spec = FilterSpec {
            ignore_mount: strings(&["/boot"]),
            ..Default::default()
        };
        assert!(!includes(&spec, "ext4", "/boot"));
        assert!(includes(&spec, "vfat", "/boot/efi"));
    }

    #[test]
    fn mount_requires_exact_mount_point() {
        let spec = FilterSpec {
            mount: strings(&["/", "/home"]),
            ..Default::default()
        };
        assert!(includes(&spec, "ext4", "/home"));
        assert!(!includes(&spec, "ext4", "/home/user"));
    }

    #[test]
    fn regexes_match_anywhere_in_mount_point() {
        let spec = FilterSpec {
            mount_regex: strings(&["data"]),
            ..Default::default()
        };
        assert!(includes(&spec, "ext4", "/srv/data1"));
        assert!(!includes(&spec, "ext4", "/srv/logs"));

        let spec = FilterSpec {
            ignore_mount_regex: strings(&["^/snap/", "docker"]),
            ..Default::default()
        };
        assert!(!includes(&spec, "squashfs", "/snap/core/123"));
        assert!(!includes(&spec, "overlay", "/var/lib/docker/overlay2/x"));
        assert!(includes(&spec, "ext4", "/var"));
    }

    #[test]
    fn ignore_mount_regex_wins_over_mount_regex() {
        let spec = FilterSpec {
            mount_regex: strings(&["^/srv"]),
            ignore_mount_regex: strings(&["tmp$"]),
            ..Default::default()
        };
        assert!(includes(&spec, "ext4", "/srv/data"));
        assert!(!includes(&spec, "ext4", "/srv/tmp"));
    }

    #[test]
    fn fs_type_target_compares_mount_lists_against_fs_type() {
        let filter = FilterSpec {
            mount: strings(&["/data"]),
            ..Default::default()
        }
        .compile()
        .unwrap();
        assert!(!filter.includes("ext4", "/data", MountMatchTarget::FsType));
        assert!(filter.includes("ext4", "/data", MountMatchTarget::MountPoint));

        let filter = FilterSpec {
            mount: strings(&["ext4"]),
            ignore_mount: strings(&["tmpfs"]),
            ..Default::default()
        }
        .compile()
        .unwrap();
        assert!(filter.includes("ext4", "/anything", MountMatchTarget::FsType));
        assert!(!filter.includes("tmpfs", "/run", MountMatchTarget::FsType));
        assert!(!filter.includes("ext4", "/anything", MountMatchTarget::MountPoint));
    }

    #[test]
    fn regexes_ignore_match_target() {
        let filter = FilterSpec {
            mount_regex: strings(&["^/data"]),
            ..Default::default()
        }
        .compile()
        .unwrap();
        assert!(filter.includes("ext4", "/data", MountMatchTarget::FsType));
        assert!(!filter.includes("ext4", "/home", MountMatchTarget::FsType));
    }

    #[test]
    fn invalid_regex_is_rejected_at_compile_time() {
        let spec = FilterSpec {
            ignore_mount_regex: strings(&["(unclosed"]),
            ..Default::default()
        };
        let err = spec.compile().unwrap_err();
        match err {
            Error::InvalidRegex {
                option, pattern, ..
            } => {
                assert_eq!(option, "ignore-mount-regex");
                assert_eq!(pattern, "(unclosed");
            }
        }
    }
}
