//! Interactive prompts
//!
//! Yes/no confirmation on the terminal, and the permission prompt used
//! before importing a photo or recording a location.

use anyhow::Result;
use async_trait::async_trait;
use std::io::{self, Write};
use tracing::warn;

use whereis_core::capability::{Permission, PermissionPrompt, PermissionStatus};

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

/// Asks for camera and location access on the terminal
pub struct TerminalPermissionPrompt {
    assume_yes: bool,
}

impl TerminalPermissionPrompt {
    /// With `assume_yes`, every request is granted without asking
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl PermissionPrompt for TerminalPermissionPrompt {
    async fn request(&self, permission: Permission) -> PermissionStatus {
        if self.assume_yes {
            return PermissionStatus::Granted;
        }

        let question = format!("{}: {} Allow?", permission.title(), permission.rationale());
        let answer = tokio::task::spawn_blocking(move || confirm(&question)).await;

        match answer {
            Ok(Ok(true)) => PermissionStatus::Granted,
            Ok(Ok(false)) => PermissionStatus::Denied,
            Ok(Err(e)) => {
                warn!(%permission, "permission prompt failed: {}", e);
                PermissionStatus::Denied
            }
            Err(e) => {
                warn!(%permission, "permission prompt task failed: {}", e);
                PermissionStatus::Denied
            }
        }
    }
}
