use tracing::warn;

use crate::{domain::ledger::Ledger, worker::reply::Reply};

pub fn handle(ledger: &Ledger, account: &str, index: &str) -> Reply {
    let outcome = ledger.entry(account, index).map(|e| e.to_string());

    if let Err(e) = &outcome {
        warn!(account, index, code = e.code(), "transaction details unavailable");
    }

    Reply::new("getTransactionDetails", account, outcome)
}
