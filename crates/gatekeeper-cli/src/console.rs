//! Commands typed on the emulator console.

use std::str::FromStr;

use gatekeeper_core::CardId;

/// One line of console input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Tap a card on the emulated reader.
    Present(CardId),

    /// Take the card away from the reader.
    Remove,

    /// Make the next identifier read fail.
    FailNextRead,

    /// Stop the emulator.
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = gatekeeper_core::Error;

    /// Parse a trimmed, non-empty line.
    ///
    /// Keywords are case-insensitive; anything else must be a card
    /// identifier such as `DE:AD:BE:EF:01` or `deadbeef01`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.to_ascii_lowercase().as_str() {
            "remove" | "r" => Ok(ConsoleCommand::Remove),
            "fail" | "f" => Ok(ConsoleCommand::FailNextRead),
            "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
            _ => line.parse().map(ConsoleCommand::Present),
        }
    }
}

/// Parse a raw console line, skipping blank lines and `#` comments.
pub fn parse_line(line: &str) -> Option<Result<ConsoleCommand, gatekeeper_core::Error>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.parse())
}

pub const HELP: &str = "\
Type a card identifier (10 hex digits, ':' '-' or spaces allowed) to tap it.
Other commands: remove, fail, quit";
