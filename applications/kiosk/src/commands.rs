//! Operator commands read from stdin
//!
//! Stands in for the page's buttons: typing `hide` presses the hide button.

use slideshow_playback::UserAction;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Map one input line to a user action
pub fn parse_command(line: &str) -> Option<UserAction> {
    match line.trim().to_ascii_lowercase().as_str() {
        "hide" | "h" => Some(UserAction::HideCurrent),
        _ => None,
    }
}

/// Forward commands from `input` until it ends or the receiver is gone
pub async fn forward_commands<R>(input: R, actions: mpsc::Sender<UserAction>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("Command input closed");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read command");
                return;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(action) => {
                if actions.send(action).await.is_err() {
                    return;
                }
            }
            None => warn!(command = %line.trim(), "Unknown command, try \"hide\""),
        }
    }
}
