//! First-match-wins command dispatch
//!
//! A single synchronous scan over the ordered pattern table, then one
//! asynchronous suspension awaiting the matched handler. No scoring, no
//! best-match search: the earliest accepting entry wins and later entries
//! are never tried. Handler errors surface as `Failure` results; nothing
//! escapes `dispatch` as an error or panic.

use crate::capabilities::Capabilities;
use crate::outcome::{CommandResult, Outcome};
use crate::patterns::PatternTable;
use tracing::{debug, info, warn};

pub struct Dispatcher {
    table: PatternTable,
    caps: Capabilities,
}

impl Dispatcher {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            table: PatternTable::standard(),
            caps,
        }
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Route one input string to at most one handler.
    ///
    /// Empty or whitespace-only input never matches. The caller decides what
    /// to do with an `Unrecognized` outcome (usually render the usage
    /// summary); it is a normal result, not an error.
    pub async fn dispatch(&self, input: &str) -> Outcome {
        if input.trim().is_empty() {
            debug!("empty input, nothing to dispatch");
            return Outcome::Unrecognized;
        }

        match self.table.first_match(input) {
            Some((spec, params)) => {
                info!(command = spec.name, "executing");
                let result = match (spec.handler)(&self.caps, params, input).await {
                    Ok(result) => result,
                    Err(err) => {
                        warn!(command = spec.name, error = %err, "command failed");
                        CommandResult::from_error(&err)
                    }
                };
                Outcome::Completed {
                    name: spec.name,
                    result,
                }
            }
            None => {
                debug!("no pattern matched input");
                Outcome::Unrecognized
            }
        }
    }
}
