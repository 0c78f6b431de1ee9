use tracing::debug;

use crate::{
    common::event::ContractCall,
    domain::contract::ContractState,
    worker::{
        handlers::{balance, details, greeting, history, receive, spent},
        reply::Reply,
    },
};

#[derive(Debug, Default)]
pub struct Processor {
    processed: usize,
}
impl Processor {
    pub fn new() -> Self {
        Self { processed: 0 }
    }

    /// Number of calls dispatched so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn process(&mut self, state: &mut ContractState, call: ContractCall) -> Reply {
        self.processed += 1;
        debug!(method = call.method(), seq = self.processed, "dispatching call");

        match call {
            ContractCall::Receive {
                account,
                amount,
                note,
            } => receive::handle(&mut state.ledger, &account, &amount, &note),
            ContractCall::Spent {
                account,
                amount,
                note,
            } => spent::handle(&mut state.ledger, &account, &amount, &note),
            ContractCall::GetBalance { account } => balance::handle(&state.ledger, &account),
            ContractCall::GetHistory { account } => history::handle(&state.ledger, &account),
            ContractCall::GetTransactionDetails { account, index } => {
                details::handle(&state.ledger, &account, &index)
            }
            ContractCall::SetGreeting { caller, name } => {
                greeting::set(&mut state.greetings, &caller, &name)
            }
            ContractCall::GetGreeting { account } => greeting::get(&state.greetings, &account),
        }
    }
}
