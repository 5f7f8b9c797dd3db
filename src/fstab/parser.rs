//! Line parser for `fstab(5)`.
//!
//! Each non-comment line holds whitespace-separated fields:
//!
//! ```text
//! <device> <mount point> <type> [<options> [<dump> [<pass>]]]
//! ```
//!
//! Only the first three fields take part in the comparison, the rest are not parsed.
//! Blank lines and lines whose first non-blank character is `#` carry no entry.

/// Represents a parsed fstab line. Fields borrow from the input and are still octal-escaped.
#[derive(Debug, PartialEq, Eq)]
pub struct FstabEntry<'a> {
    pub device: &'a str,
    pub mount_point: &'a str,
    pub fs_type: &'a str,
}

/// Named fields in an fstab line.
#[derive(Debug, PartialEq, Eq)]
pub enum FstabField {
    Device,
    MountPoint,
    FsType,
}

impl std::fmt::Display for FstabField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FstabField::Device => "device",
            FstabField::MountPoint => "mount_point",
            FstabField::FsType => "fs_type",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("missing `{field}` in line: `{line}`")]
    MissingField { field: FstabField, line: String },
}

/// Parses a single line of an fstab file.
///
/// Returns `Ok(None)` for blank lines and comments.
///
/// # Errors
///
/// Returns [`ParseError::MissingField`] if the line has fewer than three fields.
pub fn parse_fstab_line(line: &str) -> Result<Option<FstabEntry<'_>>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut fields = trimmed.split_whitespace();
    let mut next = |field: FstabField| {
        fields.next().ok_or_else(|| ParseError::MissingField {
            field,
            line: trimmed.to_owned(),
        })
    };
    let device = next(FstabField::Device)?;
    let mount_point = next(FstabField::MountPoint)?;
    let fs_type = next(FstabField::FsType)?;

    Ok(Some(FstabEntry {
        device,
        mount_point,
        fs_type,
    }))
}
