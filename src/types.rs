//! # Core Types for the Vote Engine
//!
//! This module defines the entities the engine stores in the ledger and the
//! aggregate it computes from them. Every stored entity is serialized through
//! the record codec (see [`crate::codec`]) before it reaches the ledger, so
//! field declaration order here is wire order there.
//!
//! ## Entity Categories
//!
//! ### Stored Records
//! - [`VoteSession`]: campaign metadata and the eligible-voter list
//! - [`Ballot`]: one voter's recorded choice and comment
//! - [`TallyReport`]: a computed outcome, persisted per computation for audit
//!
//! ### Value Enums
//! - [`Choice`]: the ballot options (yes / no / neutral)
//! - [`Resolution`]: the computed outcome (yes / no / equal)
//!
//! ## Input Constraints
//!
//! The positional text codec and the key scheme impose constraints the types
//! do not enforce: voter identifiers, vote identifiers and the repository URL
//! must not contain whitespace, the bracket characters `{ } [ ]`, or the
//! reserved key delimiter `|`. Values violating this decode corrupted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A ballot option, normalized to lowercase.
///
/// Parsing is case-insensitive (`"YES"`, `"Yes"` and `"yes"` are the same
/// choice); rendering is always the lowercase form, which is also the form
/// stored inside ballot records and counted by the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Yes,
    No,
    Neutral,
}

impl Choice {
    /// Parse a raw choice string case-insensitively.
    ///
    /// Anything outside the enumerated set fails with
    /// [`Error::InvalidChoice`] carrying the raw input.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.eq_ignore_ascii_case("yes") {
            Ok(Self::Yes)
        } else if raw.eq_ignore_ascii_case("no") {
            Ok(Self::No)
        } else if raw.eq_ignore_ascii_case("neutral") {
            Ok(Self::Neutral)
        } else {
            Err(Error::invalid_choice(raw))
        }
    }

    /// Lowercase text form, as stored and counted
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a tally, derived from the yes/no count delta.
///
/// `Equal` covers every zero delta, including the 0–0 case where nobody
/// voted yes or no (for instance when every recorded ballot is neutral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Yes,
    No,
    Equal,
}

impl Resolution {
    /// Lowercase text form, as rendered into reports and export rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Equal => "equal",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One vote campaign, stored under the vote identifier itself.
///
/// The vote identifier is the ledger key and is not part of the stored
/// value. Field order is the codec wire order: end date, repository URL,
/// then the eligible-voter sequence.
///
/// A session is written once at campaign start and never updated or
/// deleted. Restarting a session under the same identifier silently
/// overwrites the stored metadata; ballots already recorded stay
/// addressable under their keys but drop out of the tally scan if their
/// voter left the new list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSession {
    /// Free-text date stamp; stored, never enforced
    pub end_date: String,

    /// Free-text reference link; informational only, not validated
    pub repo_url: String,

    /// Eligible voter identifiers, in submission order.
    ///
    /// Must contain no duplicates at creation time (exact, case-sensitive
    /// comparison). The list is not re-checked after creation.
    pub voters: Vec<String>,
}

impl VoteSession {
    /// Create a session record from campaign metadata
    pub fn new(
        repo_url: impl Into<String>,
        end_date: impl Into<String>,
        voters: Vec<String>,
    ) -> Self {
        Self {
            end_date: end_date.into(),
            repo_url: repo_url.into(),
            voters,
        }
    }

    /// Find the first voter identifier that repeats in the eligible list.
    ///
    /// Comparison is exact and case-sensitive. Returns `None` when the
    /// list is duplicate-free.
    pub fn duplicate_voter(&self) -> Option<&str> {
        for (i, voter) in self.voters.iter().enumerate() {
            if self.voters[i + 1..].contains(voter) {
                return Some(voter);
            }
        }
        None
    }
}

/// One voter's recorded vote for one session.
///
/// Belongs to its session through key composition (`voteID|voter`); at most
/// one ballot exists per (session, voter) pair, and a resubmission silently
/// overwrites the prior record. The voter identifier is duplicated inside
/// the value for decode convenience even though it is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Voter identifier, also encoded in the ballot key
    pub voter: String,

    /// The normalized choice
    pub choice: Choice,

    /// Free-text comment.
    ///
    /// May contain spaces (the tally parse rejoins them), but not the
    /// bracket characters the codec strips.
    pub comment: String,
}

impl Ballot {
    /// Create a ballot record
    pub fn new(voter: impl Into<String>, choice: Choice, comment: impl Into<String>) -> Self {
        Self {
            voter: voter.into(),
            choice,
            comment: comment.into(),
        }
    }
}

/// Per-choice ballot counts for one tally pass.
///
/// Unseen choices count as zero. Neutral ballots are counted but never
/// move the yes/no delta the resolution is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyCounts {
    pub yes: usize,
    pub no: usize,
    pub neutral: usize,
}

impl TallyCounts {
    /// Record one ballot
    pub fn record(&mut self, choice: Choice) {
        match choice {
            Choice::Yes => self.yes += 1,
            Choice::No => self.no += 1,
            Choice::Neutral => self.neutral += 1,
        }
    }

    /// Total ballots counted
    pub fn total(&self) -> usize {
        self.yes + self.no + self.neutral
    }
}

/// The computed outcome for a session at the moment of computation.
///
/// Recomputed on every tally request, never cached; each computation is
/// also persisted under the report key as an audit side effect, the newest
/// write replacing the previous one. There is no single canonical final
/// report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyReport {
    /// Identifier of the tallied session
    pub vote_id: String,

    /// Repository URL carried over from the session metadata
    pub repo_url: String,

    /// Outcome derived from the recorded ballots
    pub resolution: Resolution,

    /// Ballots included in the tally, in eligible-list order.
    ///
    /// Voters without a recorded ballot do not appear here and contribute
    /// nothing to the counts.
    pub ballots: Vec<Ballot>,
}
