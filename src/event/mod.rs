//! Monitoring events and their delivery to the local monitoring agent.
//!
//! Each [`CheckResult`] becomes one [`Event`], a small JSON object that the agent's client socket
//! accepts as an external check result:
//!
//! ```json
//! {"name":"fsmounts-_data","status":2,"output":"CheckFsMounts CRITICAL: ...","handlers":["default"]}
//! ```
//!
//! Delivery is fire-and-forget. A failed send is logged and the run continues.
mod error;
mod sink;

use crate::error::ResultOkLogExt;
use crate::reconcile::CheckResult;
use crate::status::Status;

pub use error::{Error, Result};
pub use sink::{DEFAULT_AGENT_ADDR, EventSink, UdpSink, WriterSink};

/// A single check result in the agent's wire format.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Event {
    pub name: String,
    pub status: Status,
    pub output: String,
    pub handlers: Vec<String>,
}

impl Event {
    pub fn from_result(tool: &str, result: &CheckResult, handlers: &[String]) -> Self {
        Self {
            name: result.check_name.clone(),
            status: result.status,
            output: format!("{} {}: {}", tool, result.status, result.message),
            handlers: handlers.to_vec(),
        }
    }

    /// Serializes the event as a single newline-terminated JSON line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if serialization fails.
    pub fn to_line(&self) -> Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self).map_err(|source| Error::Encode {
            name: self.name.clone(),
            source,
        })?;
        line.push(b'\n');
        Ok(line)
    }
}

/// Sends every event through `sink`, returning how many were delivered to it.
///
/// Failures are logged and skipped; nothing is retried.
pub fn emit_all<'a, S: EventSink>(sink: &mut S, events: impl IntoIterator<Item = &'a Event>) -> usize {
    let mut sent = 0;
    for event in events {
        if sink.send(event).ok_log().is_some() {
            sent += 1;
        }
    }
    sent
}
