use crate::common::error::LedgerError;

/// Response to one remote call. `outcome` is the rendered body on success
/// or the tagged error on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub method: &'static str,
    pub account: String,
    pub outcome: Result<String, LedgerError>,
}

impl Reply {
    pub fn new(method: &'static str, account: &str, outcome: Result<String, LedgerError>) -> Self {
        Self {
            method,
            account: account.to_owned(),
            outcome,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Text a caller would display: the body, or the error message.
    pub fn message(&self) -> String {
        match &self.outcome {
            Ok(body) => body.clone(),
            Err(e) => e.to_string(),
        }
    }
}
