use crate::common::event::ContractCall;
use std::io::Read;

#[derive(serde::Deserialize)]
/// Internal CSV row representation matching the input headers. `arg` holds
/// the amount, index or greeting name depending on the call; it and `note`
/// may be blank.
struct CsvRow {
    call: String,
    account: String,
    #[serde(default)]
    arg: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

/// Reads and validates contract calls from a CSV reader.
///
/// Supported headers: `call,account,arg,note`.
/// Call names are matched case-insensitively, in either short (`balance`)
/// or remote (`getBalance`) spelling. `receive`, `spent`, `details` and
/// `set_greeting` require a non-blank `arg`; errors name the call and
/// account. Only `call` and `account` are trimmed: `note` and `arg` are
/// passed through as written.
///
/// # Examples
///
/// ```
/// use pocket_ledger::io::reader::read_calls;
/// use pocket_ledger::common::event::ContractCall;
/// use csv::ReaderBuilder;
///
/// let data = "call,account,arg,note\n\
/// receive,alice,100.5,salary\n\
/// getBalance,alice,,\n";
/// let mut rdr = ReaderBuilder::new().from_reader(data.as_bytes());
/// let calls: Vec<_> = read_calls(&mut rdr).collect();
///
/// assert!(matches!(calls[0], Ok(ContractCall::Receive { .. })));
/// assert!(matches!(calls[1], Ok(ContractCall::GetBalance { .. })));
/// ```
pub fn read_calls<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> impl Iterator<Item = Result<ContractCall, String>> + '_ {
    rdr.deserialize::<CsvRow>().map(|res| {
        let row = res.map_err(|e| e.to_string())?;
        let kind = row.call.trim().to_ascii_lowercase();
        let account = row.account.trim().to_owned();
        let note = row.note.unwrap_or_default();
        let arg = row.arg.filter(|a| !a.trim().is_empty());
        let require = |what: &str| {
            arg.clone()
                .ok_or_else(|| format!("{kind} missing {what} for account {account}"))
        };

        match kind.as_str() {
            "receive" => Ok(ContractCall::Receive {
                amount: require("amount")?,
                account,
                note,
            }),
            "spent" => Ok(ContractCall::Spent {
                amount: require("amount")?,
                account,
                note,
            }),
            "balance" | "getbalance" | "get_balance" => Ok(ContractCall::GetBalance { account }),
            "history" | "gethistory" | "get_history" => Ok(ContractCall::GetHistory { account }),
            "details" | "gettransactiondetails" | "get_transaction_details" => {
                Ok(ContractCall::GetTransactionDetails {
                    index: require("index")?,
                    account,
                })
            }
            "set_greeting" | "setgreeting" => Ok(ContractCall::SetGreeting {
                name: require("name")?,
                caller: account,
            }),
            "get_greeting" | "getgreeting" => Ok(ContractCall::GetGreeting { account }),
            other => Err(format!("unknown call: {other} for account {account}")),
        }
    })
}
