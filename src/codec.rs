//! Record codec for ledger storage
//!
//! Every entity the engine hands to the ledger goes through this module:
//! values are flattened to an opaque text rendering on the way in and
//! reconstructed positionally on the way out. The format is legacy and
//! deliberately preserved for storage compatibility:
//!
//! 1. Scalars encode to their plain text form
//! 2. Records encode to a label token plus their fields in declaration
//!    order, space separated, with sequences wrapped in `[` `]`
//! 3. Decoding splits on whitespace and assigns tokens by position
//!
//! The rendering is irreversible in the general case. It only works because
//! each decoder knows the exact field layout of the one record kind it
//! expects. Known input constraint: identifiers and URLs containing
//! whitespace or any of `{ } [ ]` silently corrupt decoding. A
//! self-describing encoding would remove that fragility; it would slot in
//! behind the functions in this module without touching the stores.

use crate::types::{Ballot, TallyReport, VoteSession};
use crate::{Result, storage_error};

/// Characters stripped from the ends of every positional token
const WRAPPERS: &[char] = &['{', '}', '[', ']'];

/// Record label leading an encoded vote session
const SESSION_LABEL: &str = "vote";

/// Record label leading an encoded ballot
const BALLOT_LABEL: &str = "ballot";

/// Record label leading an encoded tally report
const REPORT_LABEL: &str = "report";

/// Conversion of a typed value into an opaque ledger value.
///
/// Implemented for the scalar kinds the ledger contract recognizes and for
/// the three stored record types.
pub trait ToLedger {
    /// Encode the value as bytes suitable for a ledger put
    fn to_ledger_bytes(&self) -> Vec<u8>;
}

impl ToLedger for bool {
    fn to_ledger_bytes(&self) -> Vec<u8> {
        if *self { b"true".to_vec() } else { b"false".to_vec() }
    }
}

impl ToLedger for str {
    fn to_ledger_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl ToLedger for String {
    fn to_ledger_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl ToLedger for [u8] {
    fn to_ledger_bytes(&self) -> Vec<u8> {
        self.to_vec()
    }
}

impl ToLedger for Vec<u8> {
    fn to_ledger_bytes(&self) -> Vec<u8> {
        self.clone()
    }
}

macro_rules! impl_to_ledger_int {
    ($($ty:ty),+) => {
        $(
            impl ToLedger for $ty {
                fn to_ledger_bytes(&self) -> Vec<u8> {
                    self.to_string().into_bytes()
                }
            }
        )+
    };
}

impl_to_ledger_int!(i32, i64, u32, u64, usize);

impl ToLedger for VoteSession {
    /// `vote <end_date> <repo_url> [<voter> <voter> ...]`
    fn to_ledger_bytes(&self) -> Vec<u8> {
        format!(
            "{} {} {} [{}]",
            SESSION_LABEL,
            self.end_date,
            self.repo_url,
            self.voters.join(" ")
        )
        .into_bytes()
    }
}

impl ToLedger for Ballot {
    /// `ballot <voter> <choice> <comment>`
    fn to_ledger_bytes(&self) -> Vec<u8> {
        format!(
            "{} {} {} {}",
            BALLOT_LABEL, self.voter, self.choice, self.comment
        )
        .into_bytes()
    }
}

impl ToLedger for TallyReport {
    /// `report <vote_id> <repo_url> <resolution> [{<voter> <choice> <comment>} ...]`
    ///
    /// Write-only audit rendering; no decoder exists for it.
    fn to_ledger_bytes(&self) -> Vec<u8> {
        let ballots = self
            .ballots
            .iter()
            .map(|b| format!("{{{} {} {}}}", b.voter, b.choice, b.comment))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "{} {} {} {} [{}]",
            REPORT_LABEL, self.vote_id, self.repo_url, self.resolution, ballots
        )
        .into_bytes()
    }
}

/// Strip wrapper characters from both ends of a positional token
pub(crate) fn strip_wrappers(token: &str) -> &str {
    token.trim_matches(WRAPPERS)
}

/// Decode a stored vote session.
///
/// Positional rules, fixed by the stored format: split on whitespace,
/// discard token 0 (the record label), take token 1 as the end date, strip
/// wrappers from every remaining token, then read the first as the
/// repository URL and the rest as the eligible-voter list.
///
/// The only decoder the codec defines; ballots are parsed inside the tally
/// scan and reports are never read back.
pub fn decode_session(bytes: &[u8]) -> Result<VoteSession> {
    let text = String::from_utf8_lossy(bytes);
    let tokens: Vec<&str> = text.split_whitespace().collect();

    if tokens.len() < 3 {
        return Err(storage_error!("malformed session record: {:?}", text));
    }

    let end_date = tokens[1].to_string();
    let stripped: Vec<&str> = tokens[2..].iter().map(|t| strip_wrappers(t)).collect();

    Ok(VoteSession {
        end_date,
        repo_url: stripped[0].to_string(),
        voters: stripped[1..].iter().map(|v| v.to_string()).collect(),
    })
}
