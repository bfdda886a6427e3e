//! `/latex_unicode` command surface

use std::fmt;

use crate::utils::error::InvalidArgumentError;

/// Name under which the host registers the command
pub const COMMAND_NAME: &str = "latex_unicode";

/// Usage line shown with invalid arguments
pub const COMMAND_USAGE: &str = "reload || redownload";

/// A parsed subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rebuild the table from the cached dataset
    Reload,
    /// Fetch the dataset again, then reload
    Redownload,
}

impl Command {
    /// Parse whitespace-separated command arguments
    pub fn parse(args: &str) -> Result<Self, InvalidArgumentError> {
        let words: Vec<&str> = args.split_whitespace().collect();
        match words.as_slice() {
            ["reload"] => Ok(Command::Reload),
            ["redownload"] => Ok(Command::Redownload),
            [] => Err(InvalidArgumentError::new(format!(
                "missing subcommand (usage: {})",
                COMMAND_USAGE
            ))),
            [single] => Err(InvalidArgumentError::new(format!(
                "unknown subcommand '{}' (usage: {})",
                single, COMMAND_USAGE
            ))),
            [first, ..] => Err(InvalidArgumentError::new(format!(
                "'{}' takes no arguments, got {} (usage: {})",
                first,
                words.len() - 1,
                COMMAND_USAGE
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Reload => "reload",
            Command::Redownload => "redownload",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result reported back to the host for a command invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    Error,
}

impl CommandStatus {
    pub fn is_ok(self) -> bool {
        self == CommandStatus::Ok
    }
}
