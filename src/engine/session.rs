//! Vote session store
//!
//! Creates session records and loads them back for the other stores. A
//! session is metadata plus the eligible-voter list; once written it is
//! never updated or deleted through the engine.

use super::VoteEngine;
use crate::codec::{self, ToLedger};
use crate::ledger::Ledger;
use crate::types::VoteSession;
use crate::{Error, Result, keys};

impl<L: Ledger> VoteEngine<L> {
    /// Open a vote session.
    ///
    /// Validates that the eligible list has no repeated entry (exact,
    /// case-sensitive) and writes the encoded session at the session key.
    /// Fails with [`Error::DuplicateVoter`] before any ledger write.
    ///
    /// There is no existence check: starting a session under an identifier
    /// that already has one silently overwrites the stored metadata.
    /// Ballots recorded under the old voter list stay addressable at their
    /// keys but are orphaned from the tally if their voter left the list.
    pub fn start_session(
        &self,
        vote_id: &str,
        repo_url: &str,
        end_date: &str,
        voters: &[String],
    ) -> Result<()> {
        let session = VoteSession::new(repo_url, end_date, voters.to_vec());

        if let Some(voter) = session.duplicate_voter() {
            return Err(Error::duplicate_voter(voter));
        }

        self.ledger
            .put(keys::session(vote_id).as_bytes(), &session.to_ledger_bytes())?;

        tracing::info!(vote_id, voters = voters.len(), "vote session started");
        Ok(())
    }

    /// Load and decode the session stored under a vote identifier.
    ///
    /// A miss or a read failure both surface as [`Error::NoSuchSession`];
    /// the ledger gives no richer signal worth distinguishing here. A
    /// value that fails to decode is a storage-level corruption.
    pub(super) fn load_session(&self, vote_id: &str) -> Result<VoteSession> {
        let bytes = self
            .ledger
            .get(keys::session(vote_id).as_bytes())
            .ok()
            .flatten()
            .ok_or_else(|| Error::no_such_session(vote_id))?;

        codec::decode_session(&bytes)
    }

    /// Check that a session exists without decoding it
    pub(super) fn session_exists(&self, vote_id: &str) -> Result<()> {
        match self.ledger.get(keys::session(vote_id).as_bytes()) {
            Ok(Some(_)) => Ok(()),
            _ => Err(Error::no_such_session(vote_id)),
        }
    }
}
