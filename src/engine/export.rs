//! Tabular report builder and the raw read-side operations
//!
//! Renders the same aggregate the tally computes as semicolon-separated
//! rows, one per recorded ballot. Unlike the tally, the export persists
//! nothing: the rendered table lives in memory until it is returned, so a
//! failed export leaves no partial state behind.

use super::VoteEngine;
use crate::codec::strip_wrappers;
use crate::engine::tally;
use crate::ledger::Ledger;
use crate::{Error, Result, keys};

impl<L: Ledger> VoteEngine<L> {
    /// Render the current tally of a session as CSV bytes.
    ///
    /// One row per recorded ballot, in eligible-list order:
    /// `voteID;repoURL;endDate;voter;choice;resolution;comment`. Every
    /// field is stripped of the codec wrapper characters `{ } [ ]` before
    /// placement. Rows use the configured separator (default `;`) and
    /// CRLF terminators; fields containing the separator, a quote or a
    /// line break are quoted with doubled inner quotes.
    ///
    /// Voters without a ballot produce no row. A session with no recorded
    /// ballots renders an empty table.
    pub fn export_csv(&self, vote_id: &str) -> Result<Vec<u8>> {
        let aggregate = self.aggregate(vote_id)?;
        let resolution = tally::resolve(&aggregate.counts)?;

        let mut table = String::new();
        for ballot in &aggregate.ballots {
            let fields = [
                vote_id,
                aggregate.session.repo_url.as_str(),
                aggregate.session.end_date.as_str(),
                ballot.voter.as_str(),
                ballot.choice.as_str(),
                resolution.as_str(),
                ballot.comment.as_str(),
            ];
            write_row(&mut table, &fields, self.export.separator, self.export.crlf);
        }

        tracing::debug!(vote_id, rows = aggregate.ballots.len(), "csv export rendered");
        Ok(table.into_bytes())
    }

    /// Return the raw bytes currently stored at the session key.
    ///
    /// A passthrough, not a version log: the engine keeps no history, so
    /// this surfaces whatever single value the ledger holds right now.
    /// Miss or read failure is [`Error::NoHistory`].
    pub fn history(&self, vote_id: &str) -> Result<Vec<u8>> {
        match self.ledger.get(keys::session(vote_id).as_bytes()) {
            Ok(Some(bytes)) => Ok(bytes),
            _ => Err(Error::no_history(vote_id)),
        }
    }

    /// Close a vote session. Unimplemented: always succeeds with no
    /// effect, preserved as a stub of the stored interface.
    pub fn end_session(&self, vote_id: &str) -> Result<()> {
        tracing::debug!(vote_id, "end session requested; not implemented");
        Ok(())
    }
}

/// Append one row, stripping wrapper characters from each field
fn write_row(table: &mut String, fields: &[&str], separator: char, crlf: bool) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            table.push(separator);
        }
        push_field(table, strip_wrappers(field), separator);
    }
    table.push_str(if crlf { "\r\n" } else { "\n" });
}

/// Append one field, quoting when it would break the row structure
fn push_field(table: &mut String, field: &str, separator: char) {
    let needs_quoting = field.contains(separator)
        || field.contains('"')
        || field.contains('\r')
        || field.contains('\n');

    if !needs_quoting {
        table.push_str(field);
        return;
    }

    table.push('"');
    for c in field.chars() {
        if c == '"' {
            table.push('"');
        }
        table.push(c);
    }
    table.push('"');
}
