use check_fsmounts::TOOL_NAME;
use check_fsmounts::cli::{Args, parse_error_status};
use check_fsmounts::status::Status;
use clap::Parser;

/// Entry point for the fstab/mount table consistency check.
///
/// Prints a single `CheckFsMounts <SEVERITY>: <message>` line and exits with the numeric status
/// (0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN), as expected by the monitoring scheduler.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug check-fsmounts --ignore-fstype proc,sysfs,tmpfs --dryrun
/// ```
fn main() {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(parse_error_status(err.kind()).exit_code());
        }
    };
    let config = args.into_config();
    log::debug!("Configuration: {:?}", config);

    let status = match check_fsmounts::run(&config) {
        Ok(summary) => {
            println!("{}", summary.output(TOOL_NAME));
            summary.status
        }
        Err(err) => {
            println!("{} {}: {}", TOOL_NAME, Status::Unknown, err);
            Status::Unknown
        }
    };

    std::process::exit(status.exit_code());
}
