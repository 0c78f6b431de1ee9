use serde::{Deserialize, Serialize};

use crate::{common::money::Money, domain::footprint::Footprint};

/// Summary of an account's log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    /// Mirrors `new_balance` of the last entry.
    pub balance: Money,
    /// Index of the last entry; 0 means no transactions yet.
    pub last_index: u32,
}

impl AccountState {
    pub fn new() -> Self {
        Self {
            balance: Money::zero(),
            last_index: 0,
        }
    }
}

impl Footprint for AccountState {
    fn footprint(&self) -> usize {
        8 + 4
    }
}
