//! Result and outcome shapes for command dispatch
//!
//! Every command execution funnels into `CommandResult`, a tagged union the
//! renderer knows how to display: a failure banner, plain text, or a message
//! with optional tabular rows. `Outcome` wraps the dispatch-level distinction
//! between "a command ran" and "nothing recognized the input".

use serde::{Deserialize, Serialize};

/// One table row as ordered (column, value) pairs.
///
/// Order matters: the first row's columns define the rendered header, and
/// every row in a result must carry the same columns in the same order.
pub type Row = Vec<(String, String)>;

/// The tagged result of a command execution.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResult {
    /// The operation failed; `detail` carries the underlying cause chain.
    Failure {
        message: String,
        detail: Option<String>,
    },
    /// A bare success string.
    PlainText(String),
    /// A success message and/or tabular data.
    Message {
        text: Option<String>,
        rows: Vec<Row>,
    },
}

impl CommandResult {
    pub fn failure(message: impl Into<String>, detail: Option<String>) -> Self {
        CommandResult::Failure {
            message: message.into(),
            detail,
        }
    }

    /// Convert a handler error into a `Failure`, keeping the top-level
    /// message and flattening the source chain into the detail line.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let sources: Vec<String> = err.chain().skip(1).map(|c| c.to_string()).collect();
        CommandResult::Failure {
            message: err.to_string(),
            detail: if sources.is_empty() {
                None
            } else {
                Some(sources.join(": "))
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CommandResult::Failure { .. })
    }
}

/// What a capability manager hands back from a domain operation.
///
/// Adapters normalize this into `CommandResult`; managers never build
/// renderer-facing shapes directly.
#[derive(Clone, Debug, PartialEq)]
pub enum CapabilityPayload {
    /// A bare status string.
    Text(String),
    /// A message plus homogeneous rows (possibly empty).
    Report { message: String, rows: Vec<Row> },
}

impl CapabilityPayload {
    pub fn into_result(self) -> CommandResult {
        match self {
            CapabilityPayload::Text(value) => CommandResult::PlainText(value),
            CapabilityPayload::Report { message, rows } => CommandResult::Message {
                text: Some(message),
                rows,
            },
        }
    }
}

/// The dispatch-level outcome for one input string.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A table entry matched and its handler ran to completion.
    Completed {
        name: &'static str,
        result: CommandResult,
    },
    /// No recognizer accepted the input. A normal outcome, not an error.
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_from_error_keeps_top_message() {
        let err = anyhow::anyhow!("docker not available");
        let result = CommandResult::from_error(&err);
        assert_eq!(
            result,
            CommandResult::Failure {
                message: "docker not available".into(),
                detail: None,
            }
        );
    }

    #[test]
    fn test_from_error_flattens_cause_chain() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = anyhow::Error::from(err).context("failed to read dump");
        let result = CommandResult::from_error(&err);
        match result {
            CommandResult::Failure { message, detail } => {
                assert_eq!(message, "failed to read dump");
                assert_eq!(detail.as_deref(), Some("no such file"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_normalization() {
        assert_eq!(
            CapabilityPayload::Text("done".into()).into_result(),
            CommandResult::PlainText("done".into())
        );

        let rows = vec![vec![("name".to_string(), "demo".to_string())]];
        assert_eq!(
            CapabilityPayload::Report {
                message: "1 project".into(),
                rows: rows.clone(),
            }
            .into_result(),
            CommandResult::Message {
                text: Some("1 project".into()),
                rows,
            }
        );
    }

    #[test]
    fn test_context_errors_round_trip() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("exit status 1"));
        let err = result.context("mysqldump failed").unwrap_err();
        let failure = CommandResult::from_error(&err);
        assert!(failure.is_failure());
    }
}
