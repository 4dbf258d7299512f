/// Shell command parsing
/// 
/// One line of input is one command: a verb followed by its arguments,
/// e.g. `add Morning run`, `toggle 1704067200000`, `date 2024-01-01`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::HabitId;
use crate::routing;

/// Text printed by the `help` command
pub const HELP_TEXT: &str = "\
Commands:
  list                 show habits for the selected date
  add [name]           add a habit (without a name, retries the last rejected one)
  edit <id> <name>     rename a habit
  toggle <id>          mark or unmark a habit as done on the selected date
  stop <id>            stop tracking a habit from the selected date
  resume <id>          resume tracking a habit from the selected date
  delete <id>          delete a habit and its history
  date <YYYY-MM-DD>    select a date
  go <path>            select a date from a route such as /day/2024-01-01
  next | prev | today  move the selected date
  status               show current notices
  help                 show this text
  quit                 exit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add(Option<String>),
    Edit { habit_id: HabitId, name: String },
    Toggle(HabitId),
    Stop(HabitId),
    Resume(HabitId),
    Delete(HabitId),
    Date(NaiveDate),
    Go(String),
    Next,
    Previous,
    Today,
    Status,
    Help,
    Quit,
}

/// Errors for input that is not a valid command
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    Unknown(String),
    
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    
    #[error("Invalid habit ID '{0}'")]
    InvalidHabitId(String),
    
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    
    #[error("Habit name cannot be longer than {max} characters")]
    NameTooLong { max: usize },
}

impl Command {
    /// Parse one input line
    /// 
    /// Blank lines parse to `None`. Habit names longer than
    /// `max_name_length` characters (after trimming) are rejected here,
    /// before they reach the engine.
    pub fn parse(line: &str, max_name_length: usize) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        
        let command = match verb.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "add" => {
                if rest.is_empty() {
                    Command::Add(None)
                } else {
                    Command::Add(Some(check_name(rest, max_name_length)?))
                }
            }
            "edit" => {
                let (id, name) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::MissingArgument("name"))?;
                Command::Edit {
                    habit_id: parse_id(id)?,
                    name: check_name(name, max_name_length)?,
                }
            }
            "toggle" | "done" => Command::Toggle(parse_id(rest)?),
            "stop" => Command::Stop(parse_id(rest)?),
            "resume" => Command::Resume(parse_id(rest)?),
            "delete" | "rm" => Command::Delete(parse_id(rest)?),
            "date" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("date"));
                }
                if rest.eq_ignore_ascii_case("today") {
                    Command::Today
                } else {
                    let date = routing::parse_date(rest)
                        .ok_or_else(|| CommandError::InvalidDate(rest.to_string()))?;
                    Command::Date(date)
                }
            }
            "go" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("path"));
                }
                Command::Go(rest.to_string())
            }
            "next" => Command::Next,
            "prev" | "previous" => Command::Previous,
            "today" => Command::Today,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };
        
        Ok(Some(command))
    }
}

fn parse_id(raw: &str) -> Result<HabitId, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument("habit id"));
    }
    HabitId::from_string(raw).map_err(|_| CommandError::InvalidHabitId(raw.to_string()))
}

fn check_name(raw: &str, max: usize) -> Result<String, CommandError> {
    let name = raw.trim();
    if name.chars().count() > max {
        return Err(CommandError::NameTooLong { max });
    }
    Ok(name.to_string())
}
