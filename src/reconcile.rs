//! Comparison of declared against active mounts.
//!
//! Active mounts are checked against fstab first, then fstab is checked for entries that are not
//! mounted. Every device examined produces exactly one [`CheckResult`].
use crate::status::Status;
use crate::table::MountTable;

const CHECK_NAME_PREFIX: &str = "fsmounts-";

/// Classification of a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Mounted where fstab says it should be.
    Ok,
    /// Declared in fstab, but mounted somewhere else.
    MountpointMismatch,
    /// Declared in fstab, but not mounted.
    NotMounted,
    /// Mounted, but not declared in fstab.
    NotInFstab,
}

impl CheckKind {
    pub fn is_problem(self) -> bool {
        !matches!(self, CheckKind::Ok)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub check_name: String,
    pub kind: CheckKind,
    pub status: Status,
    pub message: String,
}

/// Derives a stable check name from a mount point, e.g. `/var/log` becomes `fsmounts-_var_log`.
pub fn check_name(mount_point: &str) -> String {
    let mut name = String::with_capacity(CHECK_NAME_PREFIX.len() + mount_point.len());
    name.push_str(CHECK_NAME_PREFIX);
    name.extend(mount_point.chars().map(|c| if c == '/' { '_' } else { c }));
    name
}

/// Compares both tables and returns one result per device.
///
/// Problems are reported with `problem_status`, which is [`Status::Warning`] or
/// [`Status::Critical`] depending on configuration.
pub fn reconcile(
    declared: &MountTable,
    active: &MountTable,
    problem_status: Status,
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(declared.len().max(active.len()));

    for mount in active {
        let (kind, message) = match declared.get(&mount.device) {
            Some(entry) if entry.mount_point == mount.mount_point => (
                CheckKind::Ok,
                format!(
                    "Device {} mounted at {} found in /etc/fstab",
                    mount.device, mount.mount_point
                ),
            ),
            Some(_) => (
                CheckKind::MountpointMismatch,
                format!(
                    "Device {} found in /etc/fstab but mountpoints do not match!",
                    mount.device
                ),
            ),
            None => (
                CheckKind::NotInFstab,
                format!(
                    "Device {} mounted at {} not found in /etc/fstab",
                    mount.device, mount.mount_point
                ),
            ),
        };
        results.push(new_result(&mount.mount_point, kind, message, problem_status));
    }

    for entry in declared {
        if !active.contains_device(&entry.device) {
            let message = format!(
                "Fstab entry with device {} and mountpoint {} is not mounted",
                entry.device, entry.mount_point
            );
            results.push(new_result(
                &entry.mount_point,
                CheckKind::NotMounted,
                message,
                problem_status,
            ));
        }
    }

    results
}

fn new_result(
    mount_point: &str,
    kind: CheckKind,
    message: String,
    problem_status: Status,
) -> CheckResult {
    let status = if kind.is_problem() {
        problem_status
    } else {
        Status::Ok
    };
    if kind.is_problem() {
        log::debug!("{}: {}", status, message);
    }
    CheckResult {
        check_name: check_name(mount_point),
        kind,
        status,
        message,
    }
}
