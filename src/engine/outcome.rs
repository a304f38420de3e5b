use serde::{Deserialize, Serialize};

use super::error::ContractError;
use super::invocation::Invocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// Result of one replayed invocation, as exported to CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Line of the invocation in the script
    pub row: u64,
    pub contract: String,
    pub function: String,
    pub status: Status,
    /// Payload decoded as UTF-8 (lossy), empty on failure
    pub payload: String,
    /// Error message, empty on success
    pub error: String,
}

impl Outcome {
    pub(crate) fn succeeded(row: u64, invocation: &Invocation, payload: &[u8]) -> Self {
        Self {
            row,
            contract: invocation.contract.clone(),
            function: invocation.function.clone(),
            status: Status::Ok,
            payload: String::from_utf8_lossy(payload).into_owned(),
            error: String::new(),
        }
    }

    pub(crate) fn failed(row: u64, invocation: &Invocation, error: &ContractError) -> Self {
        Self {
            row,
            contract: invocation.contract.clone(),
            function: invocation.function.clone(),
            status: Status::Error,
            payload: String::new(),
            error: error.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
