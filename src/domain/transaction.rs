use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{common::money::Money, domain::footprint::Footprint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Spent,
    Receive,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Spent => "spent",
            Action::Receive => "receive",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spent" => Ok(Action::Spent),
            "receive" => Ok(Action::Receive),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

/// One immutable record of a balance change.
///
/// Renders as a single history line:
/// `[2]. spent 30.2500, newBalance: 70.2500. Note: rent`
/// and parses back from that line, so a history dump loses nothing.
/// Backslashes and line breaks in the note are escaped (`\\`, `\n`, `\r`)
/// so every entry stays on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub index: u32,
    pub amount: Money,
    pub new_balance: Money,
    pub action: Action,
    pub note: String,
}

impl fmt::Display for LedgerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]. {} {}, newBalance: {}. Note: {}",
            self.index,
            self.action,
            self.amount,
            self.new_balance,
            escape_note(&self.note)
        )
    }
}

impl FromStr for LedgerEntry {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || format!("malformed history line: {line}");

        let rest = line.strip_prefix('[').ok_or_else(malformed)?;
        let (index, rest) = rest.split_once("]. ").ok_or_else(malformed)?;
        let (action, rest) = rest.split_once(' ').ok_or_else(malformed)?;
        let (amount, rest) = rest.split_once(", newBalance: ").ok_or_else(malformed)?;
        // Amounts never contain ". Note: ", so the first match ends the balance.
        let (new_balance, note) = rest.split_once(". Note: ").ok_or_else(malformed)?;

        Ok(LedgerEntry {
            index: index.parse().map_err(|_| malformed())?,
            amount: amount.parse().map_err(|_| malformed())?,
            new_balance: new_balance.parse().map_err(|_| malformed())?,
            action: action.parse()?,
            note: unescape_note(note).ok_or_else(malformed)?,
        })
    }
}

fn escape_note(note: &str) -> String {
    let mut out = String::with_capacity(note.len());
    for c in note.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Inverse of `escape_note`. `None` on a dangling or unknown escape.
fn unescape_note(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            '\\' => out.push('\\'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            _ => return None,
        }
    }
    Some(out)
}

/// Stored form of an entry. `action` and `note` may be missing when the
/// record was written by something other than this ledger; such records
/// are never surfaced as entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoredEntry {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub new_balance: Money,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub note: Option<String>,
}

impl StoredEntry {
    pub fn complete(&self) -> Option<LedgerEntry> {
        let action = self.action?;
        let note = self.note.clone()?;
        Some(LedgerEntry {
            index: self.index,
            amount: self.amount,
            new_balance: self.new_balance,
            action,
            note,
        })
    }
}

impl From<LedgerEntry> for StoredEntry {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            index: entry.index,
            amount: entry.amount,
            new_balance: entry.new_balance,
            action: Some(entry.action),
            note: Some(entry.note),
        }
    }
}

impl Footprint for StoredEntry {
    fn footprint(&self) -> usize {
        // index + amount + new balance
        4 + 8
            + 8
            + self.action.map_or(0, |a| a.as_str().len())
            + self.note.as_ref().map_or(0, String::len)
    }
}
