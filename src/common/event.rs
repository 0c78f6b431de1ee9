/// A remote call sent from the reader to the worker for processing.
///
/// Amounts and indexes stay as text here; the ledger parses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    Receive {
        account: String,
        amount: String,
        note: String,
    },
    Spent {
        account: String,
        amount: String,
        note: String,
    },
    GetBalance {
        account: String,
    },
    GetHistory {
        account: String,
    },
    GetTransactionDetails {
        account: String,
        index: String,
    },
    SetGreeting {
        caller: String,
        name: String,
    },
    GetGreeting {
        account: String,
    },
}

impl ContractCall {
    pub fn method(&self) -> &'static str {
        match self {
            ContractCall::Receive { .. } => "receive",
            ContractCall::Spent { .. } => "spent",
            ContractCall::GetBalance { .. } => "getBalance",
            ContractCall::GetHistory { .. } => "getHistory",
            ContractCall::GetTransactionDetails { .. } => "getTransactionDetails",
            ContractCall::SetGreeting { .. } => "setGreeting",
            ContractCall::GetGreeting { .. } => "getGreeting",
        }
    }
}
