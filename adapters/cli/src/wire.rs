//! JSON wire format shared with the game server.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use serde::Serialize;
use skirmish_core::{Command, Snapshot};

/// Body returned for a move request. A pass serialises as `{"move":null}`.
#[derive(Debug, Serialize)]
struct MoveResponse {
    #[serde(rename = "move")]
    command: Command,
}

/// Reads a snapshot from `path`, or from stdin when no path is given.
pub(crate) fn read_snapshot(path: Option<&Path>) -> Result<Snapshot> {
    let contents = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot at {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            let _ = io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read snapshot from stdin")?;
            buffer
        }
    };
    parse_snapshot(&contents)
}

/// Parses snapshot JSON.
pub(crate) fn parse_snapshot(contents: &str) -> Result<Snapshot> {
    serde_json::from_str(contents).context("failed to parse snapshot json")
}

/// Encodes the move response body for `command`.
pub(crate) fn encode_response(command: Command) -> Result<String> {
    serde_json::to_string(&MoveResponse { command }).context("failed to encode move response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_move_key_and_null_for_pass() {
        assert_eq!(
            encode_response(Command::Move).expect("encodes"),
            r#"{"move":"M"}"#
        );
        assert_eq!(
            encode_response(Command::Pass).expect("encodes"),
            r#"{"move":null}"#
        );
    }

    #[test]
    fn malformed_json_reports_context() {
        let error = parse_snapshot("{\"field\": 3}").expect_err("rejects");
        assert!(error.to_string().contains("snapshot json"));
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let snapshot = parse_snapshot(r#"{"field":[]}"#).expect("parses");
        assert_eq!(snapshot.narrowing_in, 0);
        assert_eq!(snapshot.game_id, 0);
    }
}
