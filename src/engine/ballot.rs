//! Ballot recorder
//!
//! Records one voter's ballot for an open session. The write is
//! last-write-wins: resubmitting replaces the prior ballot with no
//! warning and no history of the old value.

use super::VoteEngine;
use crate::codec::ToLedger;
use crate::ledger::Ledger;
use crate::types::{Ballot, Choice};
use crate::{Result, keys};

impl<L: Ledger> VoteEngine<L> {
    /// Record a ballot for `voter` in the session at `vote_id`.
    ///
    /// The session must already exist; a miss or read failure is uniformly
    /// [`crate::Error::NoSuchSession`]. The raw choice is normalized
    /// case-insensitively and rejected with [`crate::Error::InvalidChoice`]
    /// before anything is written.
    ///
    /// The voter identity is an explicit parameter; resolving the caller
    /// to an identifier is the dispatch layer's job. Note that eligibility
    /// is not checked here: a ballot recorded for a voter outside the
    /// session's list is stored but never picked up by the tally scan.
    pub fn record_vote(
        &self,
        vote_id: &str,
        voter: &str,
        choice_raw: &str,
        comment: &str,
    ) -> Result<()> {
        self.session_exists(vote_id)?;

        let choice = Choice::parse(choice_raw)?;
        let ballot = Ballot::new(voter, choice, comment);

        self.ledger
            .put(keys::ballot(vote_id, voter).as_bytes(), &ballot.to_ledger_bytes())?;

        tracing::info!(vote_id, voter, choice = %choice, "ballot recorded");
        Ok(())
    }
}
