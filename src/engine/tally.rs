//! Tally engine
//!
//! Aggregates the recorded ballots of one session into per-choice counts
//! and a resolution. The aggregation pass is shared with the export
//! builder; the tally operation itself additionally persists every
//! computed report at the report key as an audit side effect.

use std::cmp::Ordering;

use super::VoteEngine;
use crate::codec::ToLedger;
use crate::ledger::Ledger;
use crate::types::{Ballot, Choice, Resolution, TallyCounts, TallyReport, VoteSession};
use crate::{Result, counting_error, keys};

/// Everything one aggregation pass learns about a session
pub(super) struct Aggregate {
    pub session: VoteSession,
    pub ballots: Vec<Ballot>,
    pub counts: TallyCounts,
}

impl<L: Ledger> VoteEngine<L> {
    /// Read the session and scan its ballot keys in eligible-list order.
    ///
    /// Voters without a stored ballot are skipped: they contribute nothing
    /// to the counts and do not appear in the ballot sequence. Unreadable
    /// or malformed ballot values are skipped the same way (logged), since
    /// this operation's error surface has no storage outcome.
    pub(super) fn aggregate(&self, vote_id: &str) -> Result<Aggregate> {
        let session = self.load_session(vote_id)?;

        let mut ballots = Vec::new();
        let mut counts = TallyCounts::default();

        for voter in &session.voters {
            let key = keys::ballot(vote_id, voter);
            let Ok(Some(bytes)) = self.ledger.get(key.as_bytes()) else {
                continue;
            };

            match parse_ballot(voter, &bytes) {
                Some(ballot) => {
                    counts.record(ballot.choice);
                    ballots.push(ballot);
                }
                None => {
                    tracing::warn!(vote_id, voter = %voter, "skipping malformed ballot record");
                }
            }
        }

        Ok(Aggregate {
            session,
            ballots,
            counts,
        })
    }

    /// Compute the tally for a session.
    ///
    /// Resolution comes from the yes/no delta alone; neutral ballots are
    /// included in the report but never move the outcome. The encoded
    /// report is persisted at the report key before returning, one
    /// overwriting version per computation; persist failures are logged
    /// rather than surfaced so the computed result still reaches the caller.
    pub fn compute_tally(&self, vote_id: &str) -> Result<TallyReport> {
        let aggregate = self.aggregate(vote_id)?;
        let resolution = resolve(&aggregate.counts)?;

        let report = TallyReport {
            vote_id: vote_id.to_string(),
            repo_url: aggregate.session.repo_url,
            resolution,
            ballots: aggregate.ballots,
        };

        if let Err(err) = self
            .ledger
            .put(keys::report(vote_id).as_bytes(), &report.to_ledger_bytes())
        {
            tracing::warn!(vote_id, error = %err, "failed to persist tally report");
        }

        tracing::info!(
            vote_id,
            resolution = %report.resolution,
            ballots = report.ballots.len(),
            "tally computed"
        );

        Ok(report)
    }
}

/// Resolve per-choice counts into an outcome.
///
/// Sign of `count(yes) - count(no)`: positive is yes, negative is no, zero
/// is equal. The checked conversions feeding the delta are the one way
/// this can fail; the sign match itself is exhaustive.
pub(super) fn resolve(counts: &TallyCounts) -> Result<Resolution> {
    let yes = i64::try_from(counts.yes).map_err(|_| counting_error!("yes count out of range"))?;
    let no = i64::try_from(counts.no).map_err(|_| counting_error!("no count out of range"))?;

    match (yes - no).cmp(&0) {
        Ordering::Greater => Ok(Resolution::Yes),
        Ordering::Less => Ok(Resolution::No),
        Ordering::Equal => Ok(Resolution::Equal),
    }
}

/// Parse a stored ballot value positionally.
///
/// Token 1 is the stored voter copy, token 2 the choice, everything after
/// rejoined on single spaces is the comment. The voter on the returned
/// ballot is the eligible-list identifier the key was derived from, not
/// the stored copy. `None` on any layout violation.
fn parse_ballot(voter: &str, bytes: &[u8]) -> Option<Ballot> {
    let text = String::from_utf8_lossy(bytes);
    let mut tokens = text.split(' ');

    let _label = tokens.next()?;
    let _stored_voter = tokens.next()?;
    let choice = Choice::parse(tokens.next()?).ok()?;
    let comment = tokens.collect::<Vec<_>>().join(" ");

    Some(Ballot::new(voter, choice, comment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::VoteEngine;
    use crate::ledger::{Ledger, MemoryLedger};
    use crate::{Error, keys};

    fn engine_with_session(names: &[&str]) -> VoteEngine<MemoryLedger> {
        let engine = VoteEngine::new(MemoryLedger::new());
        let voters: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        engine
            .start_session("V1", "https://x", "2026-01-01", &voters)
            .unwrap();
        engine
    }

    #[test]
    fn test_resolution_sign_rule() {
        let counts = TallyCounts { yes: 3, no: 1, neutral: 0 };
        assert_eq!(resolve(&counts).unwrap(), Resolution::Yes);

        let counts = TallyCounts { yes: 1, no: 2, neutral: 5 };
        assert_eq!(resolve(&counts).unwrap(), Resolution::No);

        let counts = TallyCounts { yes: 2, no: 2, neutral: 0 };
        assert_eq!(resolve(&counts).unwrap(), Resolution::Equal);

        // 0-0 is equal, not an error
        let counts = TallyCounts::default();
        assert_eq!(resolve(&counts).unwrap(), Resolution::Equal);
    }

    #[test]
    fn test_tally_counts_and_resolves() {
        let engine = engine_with_session(&["Alice", "Bob", "Carol"]);
        engine.record_vote("V1", "Alice", "yes", "fine").unwrap();
        engine.record_vote("V1", "Bob", "no", "blocker").unwrap();
        engine.record_vote("V1", "Carol", "no", "agreed").unwrap();

        let report = engine.compute_tally("V1").unwrap();
        assert_eq!(report.resolution, Resolution::No);
        assert_eq!(report.ballots.len(), 3);
        assert_eq!(report.repo_url, "https://x");
    }

    #[test]
    fn test_non_voters_excluded() {
        let engine = engine_with_session(&["Alice", "Bob", "Carol"]);
        engine.record_vote("V1", "Alice", "neutral", "abstain-ish").unwrap();

        let report = engine.compute_tally("V1").unwrap();
        assert_eq!(report.resolution, Resolution::Equal);
        assert_eq!(report.ballots.len(), 1);
        assert_eq!(report.ballots[0].voter, "Alice");
    }

    #[test]
    fn test_ballots_follow_eligible_list_order() {
        let engine = engine_with_session(&["Carol", "Alice", "Bob"]);
        engine.record_vote("V1", "Alice", "yes", "").unwrap();
        engine.record_vote("V1", "Carol", "yes", "").unwrap();

        let report = engine.compute_tally("V1").unwrap();
        let order: Vec<&str> = report.ballots.iter().map(|b| b.voter.as_str()).collect();
        assert_eq!(order, vec!["Carol", "Alice"]);
    }

    #[test]
    fn test_tally_requires_session() {
        let engine = VoteEngine::new(MemoryLedger::new());
        let err = engine.compute_tally("absent").unwrap_err();
        assert!(matches!(err, Error::NoSuchSession { .. }));
    }

    #[test]
    fn test_tally_persists_report() {
        let engine = engine_with_session(&["Alice"]);
        engine.record_vote("V1", "Alice", "yes", "ok").unwrap();
        engine.compute_tally("V1").unwrap();

        let stored = engine
            .ledger()
            .get(keys::report("V1").as_bytes())
            .unwrap()
            .unwrap();
        assert_eq!(stored, b"report V1 https://x yes [{Alice yes ok}]");
    }

    #[test]
    fn test_repeated_tally_overwrites_report() {
        let engine = engine_with_session(&["Alice", "Bob"]);
        engine.record_vote("V1", "Alice", "yes", "").unwrap();
        engine.compute_tally("V1").unwrap();

        engine.record_vote("V1", "Bob", "no", "").unwrap();
        engine.record_vote("V1", "Alice", "no", "").unwrap();
        let report = engine.compute_tally("V1").unwrap();

        assert_eq!(report.resolution, Resolution::No);
        let stored = engine
            .ledger()
            .get(keys::report("V1").as_bytes())
            .unwrap()
            .unwrap();
        let text = String::from_utf8(stored).unwrap();
        assert!(text.starts_with("report V1 https://x no"));
    }

    #[test]
    fn test_malformed_ballot_skipped() {
        let engine = engine_with_session(&["Alice", "Bob"]);
        engine.record_vote("V1", "Alice", "yes", "ok").unwrap();

        // clobber Bob's ballot with bytes the parse cannot place
        engine
            .ledger()
            .put(keys::ballot("V1", "Bob").as_bytes(), b"garbage")
            .unwrap();

        let report = engine.compute_tally("V1").unwrap();
        assert_eq!(report.ballots.len(), 1);
        assert_eq!(report.resolution, Resolution::Yes);
    }

    #[test]
    fn test_parse_ballot_rejoins_comment_spaces() {
        let ballot = parse_ballot("Alice", b"ballot Alice yes two  spaces kept").unwrap();
        assert_eq!(ballot.comment, "two  spaces kept");
        assert_eq!(ballot.choice, Choice::Yes);
    }

    #[test]
    fn test_parse_ballot_empty_comment() {
        let ballot = parse_ballot("Alice", b"ballot Alice no ").unwrap();
        assert_eq!(ballot.comment, "");
        assert_eq!(ballot.choice, Choice::No);
    }
}
