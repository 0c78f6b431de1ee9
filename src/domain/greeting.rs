use std::collections::BTreeMap;

/// Caller-keyed display names. Kept apart from the ledger; nothing here
/// touches balances.
#[derive(Debug, Default)]
pub struct GreetingBook {
    names: BTreeMap<String, String>,
}

impl GreetingBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, caller: &str, name: &str) {
        self.names.insert(caller.to_owned(), name.to_owned());
    }

    pub fn get(&self, account: &str) -> Option<&str> {
        self.names.get(account).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
