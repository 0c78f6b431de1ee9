use crate::{domain::ledger::Ledger, worker::reply::Reply};

/// One line per entry, in index order, joined by `\n`.
pub fn handle(ledger: &Ledger, account: &str) -> Reply {
    let lines: Vec<String> = ledger
        .history(account)
        .iter()
        .map(ToString::to_string)
        .collect();

    Reply::new("getHistory", account, Ok(lines.join("\n")))
}
