//! Mountinfo line parser for Linux systems.
//!
//! Parses lines in `/proc/[pid]/mountinfo` format. See
//! [`proc_pid_mountinfo(5)`](https://man7.org/linux/man-pages/man5/proc_pid_mountinfo.5.html)
//! for details on the structure.

/// Represents a parsed mountinfo line.
///
/// Paths are returned exactly as the kernel wrote them, i.e. with whitespace still octal-escaped.
#[derive(Debug, PartialEq, Eq)]
pub struct MountInfo<'a> {
    /// Mount ID field.
    pub mount_id: &'a str,
    /// Parent mount ID field.
    pub parent_id: &'a str,
    /// Major:Minor device identifier.
    pub major_minor: &'a str,
    /// Root of the mount within the filesystem.
    pub root: &'a str,
    /// Mount point relative to the process's root.
    pub mount_point: &'a str,
    /// Per-mount options.
    pub mount_options: &'a str,
    /// Optional tagged fields such as `shared:1` (can be empty).
    pub optional_fields: Vec<&'a str>,
    /// Filesystem type (e.g., `ext4`, `tmpfs`).
    pub fs_type: &'a str,
    /// Source of the mount (e.g., `/dev/sda1`). Empty if the mount was made without one.
    pub source: &'a str,
    /// Superblock options.
    pub super_options: &'a str,
}

/// Named fields in a mountinfo line.
#[derive(Debug, PartialEq, Eq)]
pub enum MountInfoField {
    MountId,
    ParentId,
    MajorMinor,
    Root,
    MountPoint,
    MountOptions,
    FsType,
    Source,
    SuperOptions,
}

impl std::fmt::Display for MountInfoField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MountInfoField::MountId => "mount_id",
            MountInfoField::ParentId => "parent_id",
            MountInfoField::MajorMinor => "major:minor",
            MountInfoField::Root => "root",
            MountInfoField::MountPoint => "mount_point",
            MountInfoField::MountOptions => "mount_options",
            MountInfoField::FsType => "fs_type",
            MountInfoField::Source => "source",
            MountInfoField::SuperOptions => "super_options",
        };
        write!(f, "{name}")
    }
}

/// Errors that may occur when parsing a mountinfo line.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum ParseError {
    #[error("missing separator ` - ` in line: `{0}`")]
    MissingSeparator(String),

    #[error("missing `{field}` in pre-separator section of line: `{line}`")]
    MissingPreSeparatorField { field: MountInfoField, line: String },

    #[error("missing `{field}` in post-separator section of line: `{line}`")]
    MissingPostSeparatorField { field: MountInfoField, line: String },
}

/// Parses a single line of mountinfo data.
///
/// The line must follow the Linux kernel format described in [`proc_pid_mountinfo(5)`](https://man7.org/linux/man-pages/man5/proc_pid_mountinfo.5.html).
/// This function performs zero-allocation parsing except for collecting optional fields.
///
/// # Errors
///
/// Returns [`ParseError`] variants for missing separator or required fields.
pub fn parse_mount_info_line<'a>(line: &'a str) -> Result<MountInfo<'a>, ParseError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let (pre, post) = line
        .split_once(" - ")
        .ok_or_else(|| ParseError::MissingSeparator(line.to_owned()))?;

    let mut pre_fields = pre.split_whitespace();
    let mut next_pre = |field: MountInfoField| {
        pre_fields
            .next()
            .ok_or_else(|| ParseError::MissingPreSeparatorField {
                field,
                line: line.to_owned(),
            })
    };
    let mount_id = next_pre(MountInfoField::MountId)?;
    let parent_id = next_pre(MountInfoField::ParentId)?;
    let major_minor = next_pre(MountInfoField::MajorMinor)?;
    let root = next_pre(MountInfoField::Root)?;
    let mount_point = next_pre(MountInfoField::MountPoint)?;
    let mount_options = next_pre(MountInfoField::MountOptions)?;

    let optional_fields: Vec<&str> = pre_fields.collect();

    // Single spaces: an empty source is written as two consecutive spaces.
    let mut post_fields = post.trim_start().splitn(3, ' ');
    let mut next_post = |field: MountInfoField| {
        post_fields
            .next()
            .ok_or_else(|| ParseError::MissingPostSeparatorField {
                field,
                line: line.to_owned(),
            })
    };
    let fs_type = next_post(MountInfoField::FsType)?;
    let source = next_post(MountInfoField::Source)?;
    let super_options = next_post(MountInfoField::SuperOptions)?;

    Ok(MountInfo {
        mount_id,
        parent_id,
        major_minor,
        root,
        mount_point,
        mount_options,
        optional_fields,
        fs_type,
        source,
        super_options,
    })
}
