//! Ledger key derivation
//!
//! Deterministic key addressing for the three record kinds. The `|`
//! delimiter is reserved: it must not appear inside a vote identifier or a
//! voter identifier, or ballot keys become ambiguous. The constraint is
//! documented, not enforced at runtime, matching the stored data this
//! scheme must stay compatible with.

/// Reserved delimiter separating key components
pub const DELIMITER: char = '|';

/// Suffix of the report key
const REPORT_SUFFIX: &str = "result";

/// Session key: the vote identifier itself
pub fn session(vote_id: &str) -> String {
    vote_id.to_string()
}

/// Ballot key: `voteID|voter`
pub fn ballot(vote_id: &str, voter: &str) -> String {
    format!("{vote_id}{DELIMITER}{voter}")
}

/// Report key: `voteID|result`
pub fn report(vote_id: &str) -> String {
    format!("{vote_id}{DELIMITER}{REPORT_SUFFIX}")
}
