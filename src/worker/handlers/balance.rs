use crate::{domain::ledger::Ledger, worker::reply::Reply};

pub fn handle(ledger: &Ledger, account: &str) -> Reply {
    Reply::new(
        "getBalance",
        account,
        Ok(ledger.balance(account).to_string_4dp()),
    )
}
