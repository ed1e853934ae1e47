//! Terminal command interpreter
//!
//! Free-text commands are lower-cased, tokenized on whitespace and routed
//! through a fixed dispatch table. Handlers write lines to the colony
//! screen, either at once or as scheduled batches that play out over time.

mod commands;

use crate::colony::Colony;
use crate::models::constants::{COMMANDS, PROMPT};
use crate::models::errors::{ColonyError, ColonyResult};
use crate::models::history::CommandHistory;
use crate::models::line::{LineStyle, TerminalLine};

/// Terminal state: screen buffer, history and authorization.
#[derive(Debug, Default)]
pub struct Terminal {
    pub(crate) history: CommandHistory,
    pub(crate) screen: Vec<TerminalLine>,
    pub(crate) admin: bool,
    /// Expendable named by `terminate`, waiting on `override`.
    pub(crate) pending_termination: Option<u32>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }

    pub fn screen(&self) -> &[TerminalLine] {
        &self.screen
    }

    /// True once a valid override code has been entered.
    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn pending_termination(&self) -> Option<u32> {
        self.pending_termination
    }

    /// Whether any line on screen contains `needle`.
    pub fn shows(&self, needle: &str) -> bool {
        self.screen.iter().any(|l| l.text.contains(needle))
    }
}

/// Outcome of pressing the accept key on a partial command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Unique(&'static str),
    Ambiguous(Vec<&'static str>),
    NoMatch,
}

/// Table entries starting with `prefix`, in table order.
pub fn suggestions(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim().to_lowercase();
    COMMANDS
        .iter()
        .copied()
        .filter(|cmd| cmd.starts_with(&prefix))
        .collect()
}

pub fn autocomplete(input: &str) -> Completion {
    let matches = suggestions(input);
    match matches.len() {
        0 => Completion::NoMatch,
        1 => Completion::Unique(matches[0]),
        _ => Completion::Ambiguous(matches),
    }
}

/// Operator pressed enter. Blank input is ignored; anything else is
/// recorded in history, echoed and executed.
pub fn submit(colony: &mut Colony, raw: &str) {
    let command = raw.trim().to_lowercase();
    if command.is_empty() {
        return;
    }
    colony.terminal.history.push(&command);
    colony.say(TerminalLine::new(
        format!("{} {}", PROMPT, command),
        LineStyle::UserCommand,
    ));
    process_command(colony, &command);
}

/// Run a command without echo or history, as the dashboard buttons do.
pub fn process_command(colony: &mut Colony, command: &str) {
    tracing::debug!(command, "dispatching terminal command");
    if let Err(e) = dispatch(colony, command) {
        report(colony, e);
    }
}

/// The dashboard's protocol button. Locked until `override` succeeds.
pub fn open_protocols(colony: &mut Colony) {
    colony.say(TerminalLine::plain("Accessing protocol management..."));
    if colony.terminal.admin {
        colony.say(TerminalLine::success("Protocols [ADMIN]: administrator access active."));
        colony.say(TerminalLine::plain("Multiple expendable protocol disabled."));
    } else {
        colony.say(TerminalLine::error(
            "Access denied. Administrator authorization required.",
        ));
        colony.say(TerminalLine::plain("Hint: Try \"override niflheim\" command"));
    }
}

fn dispatch(colony: &mut Colony, command: &str) -> ColonyResult<()> {
    let args: Vec<&str> = command.split_whitespace().collect();
    let Some(&base) = args.first() else {
        return Ok(());
    };

    match base {
        "help" => commands::help(colony),
        "status" => commands::status(colony),
        "scan" => commands::scan(colony),
        "history" => commands::history(colony),
        "resources" => commands::resources(colony),
        "weather" => commands::weather(colony),
        "alert" => commands::alert(colony),
        "clear" => commands::clear(colony),
        "terminate" => return commands::terminate(colony, &args),
        "override" => return commands::override_protocols(colony, &args),
        "map" => commands::map(colony),
        "deploy" => commands::deploy(colony),
        "contact" => commands::contact(colony),
        "mission" => commands::mission(colony),
        "expendables" => commands::expendables(colony),
        _ => return Err(ColonyError::UnknownCommand(command.to_string())),
    }
    Ok(())
}

/// Render a failed command. Nothing here is fatal.
fn report(colony: &mut Colony, err: ColonyError) {
    match &err {
        ColonyError::UnknownCommand(_) => {
            colony.say(TerminalLine::error(err.to_string()));
            colony.say(TerminalLine::plain("Type \"help\" for available commands."));
        }
        ColonyError::MissingArgument { .. } => {
            colony.say(TerminalLine::plain(err.to_string()));
        }
        ColonyError::InvalidExpendable(_) => {
            colony.say(TerminalLine::error(err.to_string()));
            colony.say(TerminalLine::plain("Available expendables: 7, 8"));
        }
        ColonyError::AuthorizationDenied(_) => {
            colony.say(TerminalLine::error(err.to_string()));
            colony.say(TerminalLine::plain("Access denied. Security alert logged."));
        }
        ColonyError::ExpendableTerminated(_) | ColonyError::InvalidField { .. } => {
            colony.say(TerminalLine::error(err.to_string()));
        }
        ColonyError::Config(_) | ColonyError::Io(_) | ColonyError::ShutDown => {
            colony.say(TerminalLine::error(format!("Error: {}", err)));
        }
    }
}
