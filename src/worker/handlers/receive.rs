use tracing::{info, warn};

use crate::{domain::ledger::Ledger, worker::reply::Reply};

pub fn handle(ledger: &mut Ledger, account: &str, amount: &str, note: &str) -> Reply {
    let outcome = ledger.credit(account, amount, note);

    match &outcome {
        Ok(c) => info!(account, index = c.index, balance = %c.balance, "receive recorded"),
        Err(e) => warn!(account, amount, code = e.code(), "receive rejected"),
    }

    Reply::new("receive", account, outcome.map(|c| c.to_string()))
}
