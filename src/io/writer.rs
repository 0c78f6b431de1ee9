use std::io::Write;

use crate::worker::reply::Reply;

#[derive(serde::Serialize)]
/// Internal CSV output row representation.
///
/// Headers written (in this order): `call,account,status,code,body`.
/// `code` is empty for successful calls; `body` holds the rendered result or
/// the error message.
struct OutputRow<'a> {
    call: &'a str,
    account: &'a str,
    status: &'a str,
    code: &'a str,
    body: String,
}

/// Writes replies to a CSV writer in the order given.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use pocket_ledger::io::writer::write_replies;
/// use pocket_ledger::worker::reply::Reply;
///
/// let replies = vec![Reply::new("getBalance", "alice", Ok("0.0000".to_string()))];
///
/// let mut out = Vec::new();
/// write_replies(&mut out, &replies).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(s, "call,account,status,code,body\ngetBalance,alice,ok,,0.0000\n");
/// ```
pub fn write_replies<W: Write>(writer: W, replies: &[Reply]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for reply in replies {
        let (status, code) = match &reply.outcome {
            Ok(_) => ("ok", ""),
            Err(e) => ("error", e.code()),
        };
        wtr.serialize(OutputRow {
            call: reply.method,
            account: &reply.account,
            status,
            code,
            body: reply.message(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
