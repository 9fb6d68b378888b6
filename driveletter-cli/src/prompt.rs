// SPDX-License-Identifier: GPL-3.0-only

//! Console confirmation and progress output for restore runs

use std::io::{BufRead, Write};

use driveletter_core::RestoreHooks;
use driveletter_types::{EntryReport, LetterAction};
use tracing::warn;

/// Reads answers from `input`, writes prompts and per-entry status lines to `output`.
pub struct ConsoleHooks<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleHooks<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// `y` or `yes`, case-insensitive. Anything else, including EOF, is no.
    fn ask(&mut self, question: &str) -> bool {
        if let Err(e) = write!(self.output, "{question} [y/N] ").and_then(|()| self.output.flush())
        {
            warn!("Failed to write prompt: {}", e);
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => {
                let _ = writeln!(self.output);
                false
            }
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn!("Failed to read answer: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl<R: BufRead, W: Write> RestoreHooks for ConsoleHooks<R, W> {
    fn confirm(&mut self, action: &LetterAction) -> bool {
        let question = match action {
            LetterAction::Unassign { volume, letter } => {
                format!("Remove {}: from {} to free it?", letter, volume.location())
            }
            LetterAction::Assign { volume, letter } => {
                format!("Assign {}: to {}?", letter, volume.location())
            }
        };
        self.ask(&question)
    }

    fn entry_finished(&mut self, report: &EntryReport) {
        if let Err(e) = writeln!(self.output, "{}", report.status_line()) {
            warn!("Failed to write status line: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use driveletter_types::{DriveLetter, Volume};

    use super::*;

    fn action() -> LetterAction {
        LetterAction::Assign {
            volume: Volume {
                durable_id: None,
                current_letter: None,
                disk_index: 1,
                partition_index: 2,
            },
            letter: DriveLetter::new('E').unwrap(),
        }
    }

    #[test]
    fn accepts_yes_variants() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES \r\n"));
        assert!(!is_yes("\n"));
        assert!(!is_yes("yep"));
        assert!(!is_yes("n"));
    }

    #[test]
    fn prompts_with_location() {
        let mut written = Vec::new();
        let mut hooks = ConsoleHooks::new(Cursor::new("y\n"), &mut written);
        assert!(hooks.confirm(&action()));
        drop(hooks);

        assert_eq!(
            String::from_utf8(written).unwrap(),
            "Assign E: to disk 1 partition 2? [y/N] "
        );
    }

    #[test]
    fn end_of_input_declines() {
        let mut hooks = ConsoleHooks::new(Cursor::new(""), Vec::new());
        assert!(!hooks.confirm(&action()));
    }
}
