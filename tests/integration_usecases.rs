use std::fs;
use std::io::Cursor;

use pocket_ledger::{
    app, common::error::AppError, config::Cli, domain::contract::ContractState, io::snapshot,
};

fn run_case(state: &mut ContractState, input_csv: &str) -> String {
    let mut out = Vec::<u8>::new();
    app::replay(state, Cursor::new(input_csv.as_bytes()), &mut out)
        .expect("failed to replay calls");
    String::from_utf8(out).expect("output was not valid UTF-8")
}

fn normalize_csv(s: &str) -> String {
    // Normalize line endings + trim trailing whitespace lines.
    s.replace("\r\n", "\n")
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn check_fixture(name: &str) {
    let input = fs::read_to_string(format!("tests/fixtures/{name}_input.csv")).unwrap();
    let expected = fs::read_to_string(format!("tests/fixtures/{name}_expected.csv")).unwrap();

    let actual = run_case(&mut ContractState::new(), &input);

    assert_eq!(normalize_csv(&actual), normalize_csv(&expected));
}

#[test]
fn case1_receive_spend_and_read_back() {
    check_fixture("case1");
}

#[test]
fn case2_rejections_leave_state_unchanged() {
    check_fixture("case2");
}

#[test]
fn case3_greetings_and_independent_accounts() {
    check_fixture("case3");
}

#[test]
fn case4_note_whitespace_survives_the_csv_layer() {
    check_fixture("case4");

    let input = fs::read_to_string("tests/fixtures/case4_input.csv").unwrap();
    let mut state = ContractState::new();
    run_case(&mut state, &input);

    assert_eq!(state.ledger.entry("zoe", "1").unwrap().note, "  padded  ");
    assert_eq!(state.ledger.state("zoe").last_index, 1);
}

#[test]
fn note_length_boundary_through_the_boundary() {
    let input = format!(
        "call,account,arg,note\nreceive,zoe,1,{}\nreceive,zoe,1,{}\n",
        "a".repeat(255),
        "a".repeat(256)
    );
    let mut state = ContractState::new();

    let out = run_case(&mut state, &input);
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[1].starts_with("receive,zoe,ok,,Data saved."));
    assert_eq!(
        lines[2],
        "receive,zoe,error,note_too_long,Note cannot be longer than 255 symbols"
    );
    assert_eq!(state.ledger.state("zoe").last_index, 1);
}

#[test]
fn malformed_row_aborts_the_batch() {
    let mut state = ContractState::new();
    let mut out = Vec::new();

    let err = app::replay(
        &mut state,
        Cursor::new("call,account,arg,note\nspent,zoe,,\n"),
        &mut out,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::Parse(msg) if msg == "spent missing amount for account zoe"));
    assert!(out.is_empty());
}

#[test]
fn state_file_carries_the_ledger_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("ledger.json");
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    fs::write(&first, "call,account,arg,note\nreceive,alice,100.5,salary\n").unwrap();
    fs::write(&second, "call,account,arg,note\nspent,alice,30.25,rent\n").unwrap();

    for input in [&first, &second] {
        let cli = Cli {
            input: input.clone(),
            state: Some(state_path.clone()),
            log_filter: "off".into(),
        };
        app::run(&cli).unwrap();
    }

    let state = snapshot::load(&state_path).unwrap();
    let history = state.ledger.history("alice");
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].new_balance.to_string_4dp(), "70.2500");
    assert_eq!(state.ledger.storage_usage(), 97);
}

#[test]
fn missing_input_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let cli = Cli {
        input: dir.path().join("nope.csv"),
        state: None,
        log_filter: "off".into(),
    };
    assert!(matches!(app::run(&cli), Err(AppError::Io(_))));
}
