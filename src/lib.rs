//! Vote Lifecycle Engine
//!
//! Opens vote sessions, records one ballot per eligible voter, and computes
//! a binary resolution over an external key-value ledger. Entities travel
//! to the ledger through a legacy positional text codec; see [`codec`] for
//! the format and its documented input constraints.

pub mod codec;
pub mod config;
pub mod engine;
pub mod errors;
pub mod keys;
pub mod ledger;
pub mod types;

// Re-export commonly used types
pub use engine::{FixedInvoker, Invoker, VoteEngine};
pub use errors::{Error, Result};
pub use ledger::{Ledger, MemoryLedger};
pub use types::{Ballot, Choice, Resolution, TallyReport, VoteSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the vote engine with proper logging
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ballotbox=info".into()),
        )
        .init();

    tracing::info!("vote engine v{} initialized", VERSION);
    Ok(())
}
