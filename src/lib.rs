//! check-fsmounts: compares the static mount table against the kernel's active mounts.
//!
//! A run loads `/etc/fstab` and `/proc/self/mountinfo` into device-keyed tables, applies the
//! configured include/exclude filters to both, and reconciles them in both directions. Every
//! device examined becomes one event for the local monitoring agent; the number of problems
//! decides the overall check status and the process exit code.
use std::io;

use config::Config;
use device::DeviceResolver;
use event::{Event, EventSink, UdpSink, WriterSink};
use reconcile::CheckResult;
use report::Summary;
use status::Status;

pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod filter;
pub mod fstab;
pub mod fsutil;
pub mod mountinfo;
pub mod reconcile;
pub mod report;
pub mod status;
pub mod table;

/// Name the check reports itself under, prefixed to every output line.
pub const TOOL_NAME: &str = "CheckFsMounts";

/// Loads both mount tables and reconciles them.
///
/// # Errors
///
/// Returns an error if a filter regex is invalid or either mount table cannot be read.
pub fn check(config: &Config) -> error::Result<Vec<CheckResult>> {
    let filter = config.filter.compile()?;
    let resolver = if config.resolve_devices {
        DeviceResolver::new(&config.rootfs)
    } else {
        DeviceResolver::disabled()
    };

    let declared = fstab::load_declared_mounts(config.fstab_location(), &filter, &resolver)?;
    let active = mountinfo::load_active_mounts(
        config.mountinfo_location(),
        &filter,
        config.active_mount_match,
        &resolver,
    )?;
    log::debug!(
        "Reconciling {} declared against {} active mounts",
        declared.len(),
        active.len()
    );

    Ok(reconcile::reconcile(
        &declared,
        &active,
        Status::for_problem(config.warn),
    ))
}

/// Runs the check, delivering events to the agent socket or, for dry runs, to stdout.
///
/// # Errors
///
/// Returns an error if [`check`] fails or the agent socket cannot be opened. No events are
/// emitted in either case.
pub fn run(config: &Config) -> error::Result<Summary> {
    let results = check(config)?;
    if config.dryrun {
        emit(config, &results, &mut WriterSink::new(io::stdout().lock()));
    } else {
        emit(config, &results, &mut UdpSink::new(config.agent_addr)?);
    }

    Ok(report::summarize(&results, config.warn))
}

/// Runs the check, delivering events to the given sink.
///
/// # Errors
///
/// Returns an error if [`check`] fails.
pub fn run_with_sink<S: EventSink>(config: &Config, sink: &mut S) -> error::Result<Summary> {
    let results = check(config)?;
    emit(config, &results, sink);

    Ok(report::summarize(&results, config.warn))
}

fn emit<S: EventSink>(config: &Config, results: &[CheckResult], sink: &mut S) {
    let events: Vec<Event> = results
        .iter()
        .map(|result| Event::from_result(TOOL_NAME, result, &config.handlers))
        .collect();
    let sent = event::emit_all(sink, &events);
    if sent < events.len() {
        log::warn!("Delivered {} of {} events", sent, events.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterSpec;
    use std::path::Path;
    use tempfile::TempDir;

    const FSTAB: &str = "\
# <file system> <mount point> <type> <options> <dump> <pass>
/dev/sda1  /          ext4   errors=remount-ro  0  1
/dev/sdb1  /srv/data  xfs    defaults           0  2
";

    const MOUNTINFO: &str = "\
22 1 8:1 / / rw,relatime shared:1 - ext4 /dev/sda1 rw
23 22 0:21 / /proc rw,nosuid shared:12 - proc proc rw
24 22 8:17 / /srv/data rw,relatime shared:30 - xfs /dev/sdb1 rw
";

    fn fake_root(fstab: &str, mountinfo: &str) -> TempDir {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("etc")).unwrap();
        std::fs::create_dir_all(root.path().join("proc/self")).unwrap();
        std::fs::write(root.path().join("etc/fstab"), fstab).unwrap();
        std::fs::write(root.path().join("proc/self/mountinfo"), mountinfo).unwrap();
        root
    }

    fn config(root: &Path) -> Config {
        Config {
            rootfs: root.to_path_buf(),
            dryrun: true,
            handlers: vec!["default".into()],
            ..Default::default()
        }
    }

    fn run_to_lines(config: &Config) -> (Summary, Vec<serde_json::Value>) {
        let mut sink = WriterSink::new(Vec::new());
        let summary = run_with_sink(config, &mut sink).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let events = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (summary, events)
    }

    #[test]
    fn all_mounts_ok() {
        let root = fake_root(FSTAB, MOUNTINFO);
        let mut config = config(root.path());
        config.filter = FilterSpec {
            ignore_fstype: vec!["proc".into()],
            ..Default::default()
        };

        let (summary, events) = run_to_lines(&config);
        assert_eq!(summary.status, Status::Ok);
        assert_eq!(summary.problems, 0);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["name"], "fsmounts-_");
        assert_eq!(events[0]["status"], 0);
        assert_eq!(
            events[0]["output"],
            "CheckFsMounts OK: Device /dev/sda1 mounted at / found in /etc/fstab"
        );
        assert_eq!(events[1]["name"], "fsmounts-_srv_data");
        assert_eq!(events[1]["handlers"], serde_json::json!(["default"]));
    }

    #[test]
    fn undeclared_mount_is_critical() {
        let root = fake_root(FSTAB, MOUNTINFO);
        let (summary, events) = run_to_lines(&config(root.path()));

        assert_eq!(summary.status, Status::Critical);
        assert_eq!(summary.problems, 1);
        assert_eq!(summary.status.exit_code(), 2);
        let proc_event = events
            .iter()
            .find(|e| e["name"] == "fsmounts-_proc")
            .unwrap();
        assert_eq!(proc_event["status"], 2);
        assert_eq!(
            proc_event["output"],
            "CheckFsMounts CRITICAL: Device proc mounted at /proc not found in /etc/fstab"
        );
    }

    #[test]
    fn warn_downgrades_problems() {
        let root = fake_root(FSTAB, "22 1 8:1 / / rw - ext4 /dev/sda1 rw\n");
        let mut config = config(root.path());
        config.warn = true;

        let (summary, events) = run_to_lines(&config);
        assert_eq!(summary.status, Status::Warning);
        assert_eq!(summary.status.exit_code(), 1);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["status"], 1);
        assert_eq!(
            events[1]["output"],
            "CheckFsMounts WARNING: Fstab entry with device /dev/sdb1 and mountpoint /srv/data is not mounted"
        );
    }

    #[test]
    fn mount_list_quirk_on_active_mounts() {
        let root = fake_root(FSTAB, MOUNTINFO);
        let mut config = config(root.path());
        config.filter = FilterSpec {
            mount: vec!["/".into()],
            ..Default::default()
        };

        // Active mounts are matched by fs type, so `/` excludes all of them.
        let (summary, events) = run_to_lines(&config);
        assert_eq!(summary.problems, 1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["name"], "fsmounts-_");
        assert_eq!(events[0]["status"], 2);

        config.active_mount_match = filter::MountMatchTarget::MountPoint;
        let (summary, events) = run_to_lines(&config);
        assert_eq!(summary.status, Status::Ok);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn missing_fstab_is_fatal_and_emits_nothing() {
        let root = fake_root(FSTAB, MOUNTINFO);
        std::fs::remove_file(root.path().join("etc/fstab")).unwrap();
        let mut sink = WriterSink::new(Vec::new());

        let err = run_with_sink(&config(root.path()), &mut sink).unwrap_err();
        assert!(matches!(err, error::Error::Fstab(fstab::Error::FileOpen(_))));
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn missing_mountinfo_is_fatal() {
        let root = fake_root(FSTAB, MOUNTINFO);
        std::fs::remove_file(root.path().join("proc/self/mountinfo")).unwrap();

        let err = check(&config(root.path())).unwrap_err();
        assert!(matches!(
            err,
            error::Error::MountInfo(mountinfo::Error::FileOpen(_))
        ));
    }

    #[test]
    fn invalid_regex_is_fatal() {
        let root = fake_root(FSTAB, MOUNTINFO);
        let mut config = config(root.path());
        config.filter.mount_regex = vec!["[".into()];

        let err = check(&config).unwrap_err();
        assert!(matches!(err, error::Error::Filter(_)));
    }

    #[test]
    fn run_sends_events_over_udp() {
        use std::net::UdpSocket;
        use std::time::Duration;

        let agent = UdpSocket::bind("127.0.0.1:0").unwrap();
        agent
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        let root = fake_root(FSTAB, MOUNTINFO);
        let mut config = config(root.path());
        config.dryrun = false;
        config.agent_addr = agent.local_addr().unwrap();

        let summary = run(&config).unwrap();
        assert_eq!(summary.status, Status::Critical);

        let mut names = Vec::new();
        let mut buf = [0u8; 2048];
        for _ in 0..3 {
            let (len, _) = agent.recv_from(&mut buf).unwrap();
            let event: serde_json::Value = serde_json::from_slice(&buf[..len]).unwrap();
            names.push(event["name"].as_str().unwrap().to_owned());
        }
        names.sort();
        assert_eq!(names, vec!["fsmounts-_", "fsmounts-_proc", "fsmounts-_srv_data"]);
    }
}
