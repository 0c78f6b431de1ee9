use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{
    common::error::AppError,
    domain::{account::AccountState, contract::ContractState, transaction::StoredEntry},
};

/// JSON form of the whole contract state.
///
/// Entry records keep their optional fields, so a snapshot written by
/// another tool may carry incomplete records; they load as-is and history
/// reads skip them.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<AccountRow>,
    #[serde(default)]
    pub entries: Vec<EntryRow>,
    #[serde(default)]
    pub greetings: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountRow {
    pub account: String,
    #[serde(flatten)]
    pub state: AccountState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryRow {
    pub account: String,
    #[serde(flatten)]
    pub record: StoredEntry,
}

impl Snapshot {
    pub fn capture(state: &ContractState) -> Self {
        let mut accounts: Vec<AccountRow> = state
            .ledger
            .account_states()
            .map(|(account, s)| AccountRow {
                account: account.to_owned(),
                state: *s,
            })
            .collect();
        // Deterministic output: sort by account.
        accounts.sort_by(|a, b| a.account.cmp(&b.account));

        let entries = state
            .ledger
            .stored_entries()
            .map(|(account, record)| EntryRow {
                account: account.to_owned(),
                record: record.clone(),
            })
            .collect();

        let greetings = state
            .greetings
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        Self {
            accounts,
            entries,
            greetings,
        }
    }

    pub fn restore(self) -> ContractState {
        let mut state = ContractState::new();
        for row in self.accounts {
            state.ledger.restore_account(&row.account, row.state);
        }
        for row in self.entries {
            state.ledger.restore_entry(&row.account, row.record);
        }
        for (caller, name) in self.greetings {
            state.greetings.set(&caller, &name);
        }
        state
    }
}

/// Loads contract state from `path`. A missing file is an empty state.
pub fn load(path: &Path) -> Result<ContractState, AppError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no snapshot found, starting empty");
            return Ok(ContractState::new());
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
    debug!(
        accounts = snapshot.accounts.len(),
        entries = snapshot.entries.len(),
        "snapshot loaded"
    );
    Ok(snapshot.restore())
}

/// Writes `state` to a temporary file beside `path` and renames it over
/// `path`, so a failed save leaves the previous snapshot intact.
pub fn save(path: &Path, state: &ContractState) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;

    {
        let mut writer = BufWriter::new(&mut tmp);
        serde_json::to_writer_pretty(&mut writer, &Snapshot::capture(state))?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), "snapshot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::LedgerError;

    #[test]
    fn save_then_load_preserves_ledger_and_greetings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = ContractState::new();
        state.ledger.credit("alice", "100.5", "salary").unwrap();
        state.ledger.debit("alice", "30.25", "rent").unwrap();
        state.ledger.credit("bob", "1", "").unwrap();
        state.greetings.set("alice", "Alice");

        save(&path, &state).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.ledger.history("alice"), state.ledger.history("alice"));
        assert_eq!(loaded.ledger.state("alice"), state.ledger.state("alice"));
        assert_eq!(loaded.ledger.balance("bob"), state.ledger.balance("bob"));
        assert_eq!(loaded.ledger.storage_usage(), state.ledger.storage_usage());
        assert_eq!(loaded.greetings.get("alice"), Some("Alice"));
    }

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(state.ledger.storage_usage(), 0);
    }

    #[test]
    fn loaded_state_keeps_appending_after_last_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = ContractState::new();
        state.ledger.credit("alice", "5", "a").unwrap();
        save(&path, &state).unwrap();

        let mut loaded = load(&path).unwrap();
        let confirmation = loaded.ledger.credit("alice", "5", "b").unwrap();
        assert_eq!(confirmation.index, 2);
        assert_eq!(loaded.ledger.balance("alice").to_string_4dp(), "10.0000");
    }

    #[test]
    fn foreign_incomplete_records_are_skipped() {
        let json = r#"{
            "accounts": [{ "account": "alice", "balance": "3.0000", "last_index": 3 }],
            "entries": [
                { "account": "alice", "index": 1, "amount": "1.0000", "new_balance": "1.0000", "action": "receive", "note": "one" },
                { "account": "alice", "index": 2, "amount": "1.0000", "new_balance": "2.0000", "action": "receive" },
                { "account": "alice", "index": 3, "amount": "1.0000", "new_balance": "3.0000", "action": "receive", "note": "three" }
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let state = snapshot.restore();

        let indices: Vec<u32> = state
            .ledger
            .history("alice")
            .iter()
            .map(|e| e.index)
            .collect();
        assert_eq!(indices, vec![1, 3]);
        assert!(matches!(
            state.ledger.entry("alice", "2"),
            Err(LedgerError::EntryNotFound { ref index, .. }) if index == "2"
        ));
    }

    #[test]
    fn save_replaces_the_previous_snapshot_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = ContractState::new();
        state.ledger.credit("alice", "1", "first").unwrap();
        save(&path, &state).unwrap();
        state.ledger.credit("alice", "2", "second").unwrap();
        save(&path, &state).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("state.json")]);

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.ledger.state("alice").last_index, 2);
        assert_eq!(loaded.ledger.balance("alice").to_string_4dp(), "3.0000");
    }

    #[test]
    fn failed_save_leaves_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = ContractState::new();
        state.ledger.credit("alice", "1", "kept").unwrap();
        save(&path, &state).unwrap();

        // A directory missing from the target path makes the temp file fail.
        let unreachable = dir.path().join("absent").join("state.json");
        assert!(matches!(save(&unreachable, &state), Err(AppError::Io(_))));

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.ledger.entry("alice", "1").unwrap().note, "kept");
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load(&path), Err(AppError::Snapshot(_))));
    }
}
