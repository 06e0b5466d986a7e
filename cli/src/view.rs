//! Text rendering of the session state and parsing of user intents.

use std::fmt;
use std::fmt::Write as _;

use todo_core::Task;

pub const HELP: &str = "\
Commands:
  user <name>    select or register a user
  add <label>    add a task (a bare line does the same once a user is selected)
  toggle <n>     mark task n done or not done
  rm <n>         delete task n
  clear          delete all tasks and the user
  refresh        reload tasks from the service
  list           show the list again
  help           show this help
  quit           leave";

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SubmitUsername(String),
    AddTask(String),
    /// 1-based position in the rendered list.
    ToggleTask(usize),
    DeleteTask(usize),
    DeleteAll,
    Refresh,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentError {
    MissingArgument(&'static str),
    BadPosition(String),
}

impl fmt::Display for IntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentError::MissingArgument(command) => write!(f, "`{command}` needs an argument"),
            IntentError::BadPosition(raw) => write!(f, "'{raw}' is not a task number"),
        }
    }
}

impl std::error::Error for IntentError {}

impl Intent {
    /// Parses one input line. Blank lines yield `None`.
    ///
    /// A line that is not a command submits a username while no user is
    /// selected, and adds a task afterwards.
    pub fn parse(line: &str, has_user: bool) -> Result<Option<Intent>, IntentError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let intent = match command {
            "user" => Intent::SubmitUsername(required("user", rest)?.to_string()),
            "add" => Intent::AddTask(required("add", rest)?.to_string()),
            "toggle" => Intent::ToggleTask(position(required("toggle", rest)?)?),
            "rm" => Intent::DeleteTask(position(required("rm", rest)?)?),
            "clear" if rest.is_empty() => Intent::DeleteAll,
            "refresh" if rest.is_empty() => Intent::Refresh,
            "list" if rest.is_empty() => Intent::Show,
            "help" if rest.is_empty() => Intent::Help,
            "quit" | "exit" if rest.is_empty() => Intent::Quit,
            _ if has_user => Intent::AddTask(line.to_string()),
            _ => Intent::SubmitUsername(line.to_string()),
        };
        Ok(Some(intent))
    }
}

fn required<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, IntentError> {
    if rest.is_empty() {
        Err(IntentError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn position(raw: &str) -> Result<usize, IntentError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(IntentError::BadPosition(raw.to_string())),
    }
}

/// Renders the current state.
pub fn render(username: Option<&str>, tasks: &[Task]) -> String {
    let Some(name) = username else {
        return "Enter user name:\n".to_string();
    };

    let mut out = String::new();
    let pending = tasks.iter().filter(|t| !t.done).count();
    let _ = writeln!(out, "{name}'s todo list");
    let _ = writeln!(out, "Tasks left to complete: {pending}");
    if tasks.is_empty() {
        out.push_str("  (no tasks yet, type one to add it)\n");
        return out;
    }
    for (i, task) in tasks.iter().enumerate() {
        let mark = if task.done { 'x' } else { ' ' };
        let _ = writeln!(out, "  {}. [{mark}] {}", i + 1, task.label);
    }
    out.push_str("Type `clear` to delete all tasks.\n");
    out
}
