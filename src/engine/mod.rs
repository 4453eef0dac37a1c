//! Vote engine facade and dispatch surface
//!
//! [`VoteEngine`] ties the stores together over one [`Ledger`] and exposes
//! the operation surface upward. Library callers use the typed methods
//! directly; command-style callers route through [`VoteEngine::invoke`],
//! which maps a function name and positional string arguments onto them the
//! way an outer dispatch layer expects.
//!
//! Caller identity is never read from ambient state. The dispatch adapter
//! resolves the acting voter through the [`Invoker`] collaborator and
//! passes it down explicitly, keeping the recorder free of hidden
//! dependencies.

mod ballot;
mod export;
mod session;
mod tally;

use crate::config::ExportConfig;
use crate::ledger::Ledger;
use crate::{Error, Result, codec::ToLedger};

/// Identity collaborator: resolves the caller of the current operation to
/// a stable opaque identifier.
pub trait Invoker {
    /// Identifier of the current caller
    fn current_invoker(&self) -> String;
}

/// Invoker with a fixed identity, for tests and single-actor embeddings
#[derive(Debug, Clone)]
pub struct FixedInvoker(pub String);

impl Invoker for FixedInvoker {
    fn current_invoker(&self) -> String {
        self.0.clone()
    }
}

/// Vote lifecycle engine over a key-value ledger.
///
/// Every operation is a synchronous unit of work: it validates its own
/// preconditions, performs blocking ledger calls, and returns a tagged
/// result. No retries, no rollback, no cross-key atomicity.
pub struct VoteEngine<L: Ledger> {
    ledger: L,
    export: ExportConfig,
}

impl<L: Ledger> VoteEngine<L> {
    /// Create an engine over a ledger with default export settings
    pub fn new(ledger: L) -> Self {
        Self {
            ledger,
            export: ExportConfig::default(),
        }
    }

    /// Create an engine with explicit export settings
    pub fn with_export_config(ledger: L, export: ExportConfig) -> Self {
        Self { ledger, export }
    }

    /// Access the underlying ledger
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Route a named operation with positional arguments.
    ///
    /// Function names are matched case-insensitively against the operation
    /// surface: `StartSession`, `RecordVote`, `ComputeTally`, `ExportCSV`,
    /// `History`, `EndSession`. The acting voter for `RecordVote` comes
    /// from the identity collaborator. Returns the operation payload as
    /// bytes; effect-only operations return an empty payload.
    pub fn invoke(&self, invoker: &dyn Invoker, function: &str, args: &[String]) -> Result<Vec<u8>> {
        tracing::debug!(function, args = args.len(), "dispatching operation");

        match function.to_ascii_lowercase().as_str() {
            "startsession" => {
                if args.len() < 4 {
                    return Err(Error::invalid_arguments(
                        "StartSession needs voteID, repoURL, endDate and at least one voter",
                    ));
                }
                self.start_session(&args[0], &args[1], &args[2], &args[3..])?;
                Ok(Vec::new())
            }
            "recordvote" => {
                if args.len() < 3 {
                    return Err(Error::invalid_arguments(
                        "RecordVote needs voteID, choice and comment",
                    ));
                }
                let voter = invoker.current_invoker();
                self.record_vote(&args[0], &voter, &args[1], &args[2])?;
                Ok(Vec::new())
            }
            "computetally" => {
                let vote_id = single_arg("ComputeTally", args)?;
                let report = self.compute_tally(vote_id)?;
                Ok(report.to_ledger_bytes())
            }
            "exportcsv" => {
                let vote_id = single_arg("ExportCSV", args)?;
                self.export_csv(vote_id)
            }
            "history" => {
                let vote_id = single_arg("History", args)?;
                self.history(vote_id)
            }
            "endsession" => {
                let vote_id = single_arg("EndSession", args)?;
                self.end_session(vote_id)?;
                Ok(Vec::new())
            }
            other => Err(Error::invalid_arguments(format!(
                "unknown function: {other}"
            ))),
        }
    }
}

/// Extract the single voteID argument of the read-side operations
fn single_arg<'a>(operation: &str, args: &'a [String]) -> Result<&'a str> {
    match args {
        [vote_id] => Ok(vote_id),
        _ => Err(Error::invalid_arguments(format!(
            "{operation} needs exactly one argument: voteID"
        ))),
    }
}
