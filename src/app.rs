use std::io::{stdout, BufWriter, Read, Write};

use tracing::info;

use crate::{
    common::error::AppError,
    config::Cli,
    domain::contract::ContractState,
    io::{reader, snapshot, writer},
    worker::processor::Processor,
};

pub fn run(cli: &Cli) -> Result<(), AppError> {
    let mut state = match &cli.state {
        Some(path) => snapshot::load(path)?,
        None => ContractState::new(),
    };

    let file = std::fs::File::open(&cli.input)?;
    let stdout = stdout();
    let out = BufWriter::new(stdout.lock());
    replay(&mut state, file, out)?;

    if let Some(path) = &cli.state {
        snapshot::save(path, &state)?;
    }

    Ok(())
}

/// Runs every call read from `input` against `state` and writes the replies
/// as CSV to `output`. The first malformed row aborts the batch before any
/// reply is written. Only headers are trimmed here; notes and names reach
/// the ledger byte for byte.
pub fn replay<R: Read, W: Write>(
    state: &mut ContractState,
    input: R,
    output: W,
) -> Result<(), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(input);
    let calls = reader::read_calls(&mut reader);

    let mut processor = Processor::new();
    let mut replies = Vec::new();

    for call in calls {
        let call = call.map_err(AppError::Parse)?;
        replies.push(processor.process(state, call));
    }

    let rejected = replies.iter().filter(|r| !r.is_ok()).count();
    info!(
        processed = processor.processed(),
        rejected, "batch replayed"
    );

    writer::write_replies(output, &replies)?;

    Ok(())
}
