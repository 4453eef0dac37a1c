//! Edge-case coverage for the vote engine's documented semantics

use ballotbox::{
    Error, FixedInvoker, Ledger, MemoryLedger, Resolution, Result, VoteEngine, keys,
};

fn voters(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn strings(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_last_write_wins_across_tallies() -> Result<()> {
    // Two successive ballots for the same (session, voter): only the
    // second is visible to any later tally
    let engine = VoteEngine::new(MemoryLedger::new());
    engine.start_session("V1", "https://x", "2020-01-01", &voters(&["Alice"]))?;

    engine.record_vote("V1", "Alice", "yes", "first thoughts")?;
    assert_eq!(engine.compute_tally("V1")?.resolution, Resolution::Yes);

    engine.record_vote("V1", "Alice", "no", "changed my mind")?;
    let report = engine.compute_tally("V1")?;
    assert_eq!(report.resolution, Resolution::No);
    assert_eq!(report.ballots.len(), 1);
    assert_eq!(report.ballots[0].comment, "changed my mind");

    Ok(())
}

#[test]
fn test_session_restart_orphans_old_ballots() -> Result<()> {
    // Restarting a session silently replaces the voter list; ballots of
    // voters no longer listed stay stored but drop out of the tally
    let engine = VoteEngine::new(MemoryLedger::new());
    engine.start_session("V1", "https://x", "2020-01-01", &voters(&["Alice", "Bob"]))?;
    engine.record_vote("V1", "Alice", "yes", "")?;
    engine.record_vote("V1", "Bob", "no", "")?;

    engine.start_session("V1", "https://x", "2020-06-01", &voters(&["Bob"]))?;

    let report = engine.compute_tally("V1")?;
    assert_eq!(report.ballots.len(), 1);
    assert_eq!(report.ballots[0].voter, "Bob");
    assert_eq!(report.resolution, Resolution::No);

    // Alice's ballot is still addressable at its key, just unreachable
    let orphan = engine.ledger().get(keys::ballot("V1", "Alice").as_bytes())?;
    assert!(orphan.is_some());

    Ok(())
}

#[test]
fn test_ballot_for_unlisted_voter_never_counts() -> Result<()> {
    // The recorder does not check eligibility; the tally scan only visits
    // listed voters, so an unlisted ballot is stored and ignored
    let engine = VoteEngine::new(MemoryLedger::new());
    engine.start_session("V1", "https://x", "2020-01-01", &voters(&["Alice"]))?;
    engine.record_vote("V1", "Mallory", "yes", "let me in")?;

    let report = engine.compute_tally("V1")?;
    assert!(report.ballots.is_empty());
    assert_eq!(report.resolution, Resolution::Equal);

    Ok(())
}

#[test]
fn test_all_three_choices_count_once_each() -> Result<()> {
    let engine = VoteEngine::new(MemoryLedger::new());
    engine.start_session(
        "V1",
        "https://x",
        "2020-01-01",
        &voters(&["Alice", "Bob", "Carol"]),
    )?;
    engine.record_vote("V1", "Alice", "YES", "")?;
    engine.record_vote("V1", "Bob", "No", "")?;
    engine.record_vote("V1", "Carol", "NEUTRAL", "")?;

    let report = engine.compute_tally("V1")?;
    assert_eq!(report.resolution, Resolution::Equal); // 1 yes - 1 no
    assert_eq!(report.ballots.len(), 3);

    // normalized lowercase inside the report
    let choices: Vec<&str> = report.ballots.iter().map(|b| b.choice.as_str()).collect();
    assert_eq!(choices, vec!["yes", "no", "neutral"]);

    Ok(())
}

#[test]
fn test_empty_and_spaced_comments_survive() -> Result<()> {
    let engine = VoteEngine::new(MemoryLedger::new());
    engine.start_session("V1", "https://x", "2020-01-01", &voters(&["Alice", "Bob"]))?;
    engine.record_vote("V1", "Alice", "yes", "")?;
    engine.record_vote("V1", "Bob", "no", "a comment  with   spacing")?;

    let report = engine.compute_tally("V1")?;
    assert_eq!(report.ballots[0].comment, "");
    assert_eq!(report.ballots[1].comment, "a comment  with   spacing");

    Ok(())
}

#[test]
fn test_history_is_session_bytes_even_after_tally() -> Result<()> {
    // History reads the session's own key; the report written by the
    // tally lives under a different key and never shadows it
    let engine = VoteEngine::new(MemoryLedger::new());
    engine.start_session("V1", "https://x", "2020-01-01", &voters(&["Alice"]))?;
    engine.record_vote("V1", "Alice", "yes", "ok")?;
    engine.compute_tally("V1")?;

    let history = engine.history("V1")?;
    assert_eq!(history, b"vote 2020-01-01 https://x [Alice]");

    Ok(())
}

#[test]
fn test_dispatch_full_flow() -> Result<()> {
    // Drive every operation through the positional dispatch surface
    let engine = VoteEngine::new(MemoryLedger::new());
    let alice = FixedInvoker("Alice".into());
    let bob = FixedInvoker("Bob".into());

    engine.invoke(
        &alice,
        "startsession",
        &strings(&["V1", "https://x", "2020-01-01", "Alice", "Bob"]),
    )?;
    engine.invoke(&alice, "recordvote", &strings(&["V1", "yes", "fine"]))?;
    engine.invoke(&bob, "recordvote", &strings(&["V1", "yes", "also fine"]))?;

    let report = engine.invoke(&alice, "computetally", &strings(&["V1"]))?;
    assert!(report.starts_with(b"report V1 https://x yes"));

    let csv = engine.invoke(&alice, "exportcsv", &strings(&["V1"]))?;
    assert_eq!(
        String::from_utf8(csv).unwrap().matches("\r\n").count(),
        2 // one row per recorded ballot
    );

    let history = engine.invoke(&alice, "history", &strings(&["V1"]))?;
    assert!(history.starts_with(b"vote "));

    let end = engine.invoke(&alice, "endsession", &strings(&["V1"]))?;
    assert!(end.is_empty());

    Ok(())
}

#[test]
fn test_dispatch_arity_failures() {
    let engine = VoteEngine::new(MemoryLedger::new());
    let invoker = FixedInvoker("Alice".into());

    for (function, args) in [
        ("startsession", strings(&["V1", "https://x", "2020-01-01"])),
        ("recordvote", strings(&["V1", "yes"])),
        ("computetally", strings(&[])),
        ("exportcsv", strings(&["V1", "extra"])),
        ("history", strings(&[])),
        ("endsession", strings(&[])),
    ] {
        let err = engine.invoke(&invoker, function, &args).unwrap_err();
        assert!(
            matches!(err, Error::InvalidArguments { .. }),
            "{function} should fail arity check"
        );
    }

    assert!(engine.ledger().is_empty());
}

#[test]
fn test_tally_of_missing_session_vs_history_of_missing_key() {
    // Same underlying miss, two different error tags by operation
    let engine = VoteEngine::new(MemoryLedger::new());

    assert!(matches!(
        engine.compute_tally("absent").unwrap_err(),
        Error::NoSuchSession { .. }
    ));
    assert!(matches!(
        engine.history("absent").unwrap_err(),
        Error::NoHistory { .. }
    ));
}
