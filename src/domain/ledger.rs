use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    num::IntErrorKind,
};

use tracing::debug;

use crate::{
    common::{error::LedgerError, money::Money},
    domain::{
        account::AccountState,
        footprint::Footprint,
        transaction::{Action, LedgerEntry, StoredEntry},
    },
};

pub const NOTE_LENGTH_LIMIT: usize = 255;

/// Returned by a successful `credit` or `debit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub index: u32,
    pub balance: Money,
    /// Storage footprint after the write.
    pub footprint: usize,
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Data saved. ( storage [ {} bytes ] )", self.footprint)
    }
}

/// Per-account balances and append-only transaction logs.
///
/// Entries live under the composite key `(account, index)` in an ordered
/// map, so one account's log is a contiguous key range. Mutations take
/// `&mut self` and commit the entry and the summary together, after every
/// check has passed.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<String, AccountState>,
    entries: BTreeMap<(String, u32), StoredEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            entries: BTreeMap::new(),
        }
    }

    /// Summary for `account`, defaulting to a zero balance and no entries.
    pub fn state(&self, account: &str) -> AccountState {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    pub fn credit(
        &mut self,
        account: &str,
        amount: &str,
        note: &str,
    ) -> Result<Confirmation, LedgerError> {
        let amount = parse_amount(amount)?;
        check_note(note)?;

        let state = self.state(account);
        let new_balance = state
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;

        Ok(self.commit(account, state, amount, new_balance, Action::Receive, note))
    }

    pub fn debit(
        &mut self,
        account: &str,
        amount: &str,
        note: &str,
    ) -> Result<Confirmation, LedgerError> {
        let amount = parse_amount(amount)?;

        let state = self.state(account);
        if amount > state.balance {
            return Err(LedgerError::InsufficientBalance);
        }

        check_note(note)?;

        let new_balance = state
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::AmountOverflow)?;

        Ok(self.commit(account, state, amount, new_balance, Action::Spent, note))
    }

    pub fn balance(&self, account: &str) -> Money {
        self.state(account).balance
    }

    /// Entries `1..=last_index` in ascending order. Absent or incomplete
    /// records are skipped, so callers must not assume a dense sequence.
    pub fn history(&self, account: &str) -> Vec<LedgerEntry> {
        let last_index = self.state(account).last_index;
        if last_index == 0 {
            return Vec::new();
        }

        self.entries
            .range((account.to_owned(), 1)..=(account.to_owned(), last_index))
            .filter_map(|(_, stored)| stored.complete())
            .collect()
    }

    /// Looks up one entry by its index text. Integers that cannot name a
    /// stored record (zero, negative, or beyond `i64`) are not found rather
    /// than invalid.
    pub fn entry(&self, account: &str, index: &str) -> Result<LedgerEntry, LedgerError> {
        let text = index.trim();
        let parsed = match text.parse::<i64>() {
            Ok(value) => Some(value),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => None,
                _ => return Err(LedgerError::InvalidIndex),
            },
        };

        parsed
            .and_then(|i| u32::try_from(i).ok())
            .and_then(|i| self.entries.get(&(account.to_owned(), i)))
            .and_then(StoredEntry::complete)
            .ok_or_else(|| LedgerError::EntryNotFound {
                index: text.to_owned(),
                footprint: self.storage_usage(),
            })
    }

    pub fn storage_usage(&self) -> usize {
        self.footprint()
    }

    pub fn account_states(&self) -> impl Iterator<Item = (&str, &AccountState)> {
        self.accounts.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn stored_entries(&self) -> impl Iterator<Item = (&str, &StoredEntry)> {
        self.entries.iter().map(|((k, _), v)| (k.as_str(), v))
    }

    /// Places a summary as-is. Used when loading a snapshot.
    pub fn restore_account(&mut self, account: &str, state: AccountState) {
        self.accounts.insert(account.to_owned(), state);
    }

    /// Places a stored record as-is, complete or not. Used when loading a
    /// snapshot.
    pub fn restore_entry(&mut self, account: &str, stored: StoredEntry) {
        self.entries
            .insert((account.to_owned(), stored.index), stored);
    }

    fn commit(
        &mut self,
        account: &str,
        state: AccountState,
        amount: Money,
        new_balance: Money,
        action: Action,
        note: &str,
    ) -> Confirmation {
        let index = state.last_index + 1;
        let entry = LedgerEntry {
            index,
            amount,
            new_balance,
            action,
            note: note.to_owned(),
        };

        self.entries
            .insert((account.to_owned(), index), StoredEntry::from(entry));
        self.accounts.insert(
            account.to_owned(),
            AccountState {
                balance: new_balance,
                last_index: index,
            },
        );

        debug!(account, index, %action, %amount, balance = %new_balance, "entry committed");

        Confirmation {
            index,
            balance: new_balance,
            footprint: self.storage_usage(),
        }
    }
}

impl Footprint for Ledger {
    fn footprint(&self) -> usize {
        let summaries: usize = self
            .accounts
            .iter()
            .map(|(account, state)| account.len() + state.footprint())
            .sum();
        let records: usize = self
            .entries
            .iter()
            .map(|((account, _), stored)| account.len() + 4 + stored.footprint())
            .sum();
        summaries + records
    }
}

fn parse_amount(text: &str) -> Result<Money, LedgerError> {
    match text.parse::<Money>() {
        Ok(amount) if amount.is_positive() => Ok(amount),
        _ => Err(LedgerError::NegativeAmount),
    }
}

fn check_note(note: &str) -> Result<(), LedgerError> {
    if note.chars().count() > NOTE_LENGTH_LIMIT {
        return Err(LedgerError::NoteTooLong {
            limit: NOTE_LENGTH_LIMIT,
        });
    }
    Ok(())
}
