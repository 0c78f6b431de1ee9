use tracing::{info, warn};

use crate::{domain::ledger::Ledger, worker::reply::Reply};

pub fn handle(ledger: &mut Ledger, account: &str, amount: &str, note: &str) -> Reply {
    let outcome = ledger.debit(account, amount, note);

    match &outcome {
        Ok(c) => info!(account, index = c.index, balance = %c.balance, "spent recorded"),
        Err(e) => warn!(account, amount, code = e.code(), "spent rejected"),
    }

    Reply::new("spent", account, outcome.map(|c| c.to_string()))
}
