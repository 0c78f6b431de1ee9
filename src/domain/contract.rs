use crate::domain::{greeting::GreetingBook, ledger::Ledger};

/// Everything a contract call can read or write.
#[derive(Debug, Default)]
pub struct ContractState {
    pub ledger: Ledger,
    pub greetings: GreetingBook,
}

impl ContractState {
    pub fn new() -> Self {
        Self::default()
    }
}
