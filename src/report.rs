//! Aggregation of check results into the overall check outcome.
use crate::reconcile::CheckResult;
use crate::status::Status;

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub problems: usize,
    pub status: Status,
}

impl Summary {
    pub fn message(&self) -> String {
        if self.problems > 0 {
            format!("Found {} problems", self.problems)
        } else {
            "All mountpoints are OK".to_owned()
        }
    }

    /// Renders the final check line, e.g. `CheckFsMounts CRITICAL: Found 2 problems`.
    pub fn output(&self, tool: &str) -> String {
        format!("{} {}: {}", tool, self.status, self.message())
    }
}

/// Counts problems and derives the overall severity.
///
/// Any problem makes the run [`Status::Warning`] when `warn` is set and [`Status::Critical`]
/// otherwise; a run without problems is [`Status::Ok`].
pub fn summarize(results: &[CheckResult], warn: bool) -> Summary {
    let problems = results.iter().filter(|r| r.kind.is_problem()).count();
    let status = if problems > 0 {
        Status::for_problem(warn)
    } else {
        Status::Ok
    };

    Summary { problems, status }
}
