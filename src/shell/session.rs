/// Shell session that drives the engine from a line-oriented stream
///
/// The loop:
/// 1. Reads one command per line from the input
/// 2. Applies it to the habit operations
/// 3. Writes the resulting day view (and any notices) to the output
///
/// While waiting for input it also sleeps until the next notice deadline so
/// error and success messages clear themselves on time.

use std::time::Instant;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::operations::HabitOperations;
use crate::routing;
use crate::shell::command::{Command, HELP_TEXT};
use crate::storage::KeyValueStore;

const SELECTED_DATE_LABEL: &str = "Selected Date:";
const STOPPED_LABEL: &str = "(Stopped)";
const LOCKED_MESSAGE: &str = "cannot be completed on this day";
const NOT_LISTED_MESSAGE: &str = "is not a habit on this day";

/// What the session should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Session<S: KeyValueStore> {
    operations: HabitOperations<S>,
    max_name_length: usize,
    locale: String,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(operations: HabitOperations<S>, config: &AppConfig) -> Self {
        Self {
            operations,
            max_name_length: config.max_habit_name_length,
            locale: config.locale.clone(),
        }
    }

    pub fn operations(&self) -> &HabitOperations<S> {
        &self.operations
    }

    /// Run until the input closes or a `quit` command arrives
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Shell session started on {}", self.operations.selected_date());

        let mut lines = BufReader::new(input).lines();
        self.write(&mut output, &self.banner()).await?;

        loop {
            let deadline = self.operations.next_notice_deadline();

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        info!("Shell session ending (input closed)");
                        break;
                    };

                    match self.handle_line(&line) {
                        Some(Reply::Text(text)) => self.write(&mut output, &text).await?,
                        Some(Reply::Quit) => {
                            info!("Shell session ending (quit)");
                            break;
                        }
                        None => {}
                    }
                }
                _ = wait_for(deadline) => {
                    if self.operations.expire_notices(Instant::now()) {
                        debug!("Cleared expired notices");
                    }
                }
            }
        }

        Ok(())
    }

    /// Parse and execute one line of input
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        self.operations.expire_notices(Instant::now());

        debug!("Processing command: {}", line.trim());
        match Command::parse(line, self.max_name_length) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(e) => Some(Reply::Text(format!("Error: {}", e))),
        }
    }

    /// Apply a command and describe the result
    pub fn execute(&mut self, command: Command) -> Reply {
        let ops = &mut self.operations;

        match command {
            Command::List => {}
            Command::Add(name) => {
                if let Some(name) = name {
                    ops.set_draft(name);
                }
                if let Err(e) = ops.submit_draft() {
                    debug!("Add rejected: {}", e);
                }
            }
            Command::Edit { habit_id, name } => {
                if let Err(e) = ops.edit_habit(habit_id, &name) {
                    debug!("Edit of {} rejected: {}", habit_id, e);
                }
            }
            Command::Toggle(habit_id) => {
                let disabled = ops
                    .day_view()
                    .rows
                    .iter()
                    .find(|row| row.habit.id == habit_id)
                    .map(|row| row.disabled);
                match disabled {
                    Some(false) => {
                        ops.toggle_habit(habit_id);
                    }
                    Some(true) => {
                        debug!("Toggle of {} refused on {}", habit_id, ops.selected_date());
                        return Reply::Text(format!("Error: {} {}", habit_id, LOCKED_MESSAGE));
                    }
                    None => {
                        return Reply::Text(format!("Error: {} {}", habit_id, NOT_LISTED_MESSAGE));
                    }
                }
            }
            Command::Stop(habit_id) => {
                ops.stop_habit(habit_id);
            }
            Command::Resume(habit_id) => {
                ops.resume_habit(habit_id);
            }
            Command::Delete(habit_id) => {
                ops.delete_habit(habit_id);
            }
            Command::Date(date) => ops.set_selected_date(date),
            Command::Go(path) => {
                let date = routing::date_from_path(&path, routing::today());
                ops.set_selected_date(date);
            }
            Command::Next => ops.next_day(),
            Command::Previous => ops.previous_day(),
            Command::Today => ops.go_to_today(),
            Command::Status => return Reply::Text(self.render_notices()),
            Command::Help => return Reply::Text(HELP_TEXT.to_string()),
            Command::Quit => return Reply::Quit,
        }

        Reply::Text(self.render())
    }

    /// Day view followed by any visible notices
    pub fn render(&self) -> String {
        let mut text = self.render_day();
        let notices = self.render_notices();
        if !notices.is_empty() {
            text.push('\n');
            text.push_str(&notices);
        }
        text
    }

    fn render_day(&self) -> String {
        let view = self.operations.day_view();

        let mut lines = vec![format!(
            "{} {} {}{}  {}",
            SELECTED_DATE_LABEL,
            view.date.format("%Y-%m-%d"),
            view.date.format("(%A)"),
            if view.is_future { " [future]" } else { "" },
            routing::day_path(view.date)
        )];

        if view.rows.is_empty() {
            lines.push("  No habits yet. Use 'add <name>' to create one.".to_string());
        }
        for row in &view.rows {
            lines.push(format!(
                "  [{}] {}  {}{}",
                if row.completed { "x" } else { " " },
                row.habit.id,
                row.habit.name,
                if row.stopped { format!(" {}", STOPPED_LABEL) } else { String::new() }
            ));
        }

        lines.push(format!(
            "Completed: {} / {} | Left: {}",
            view.summary.completed,
            view.summary.total,
            view.summary.left()
        ));
        lines.join("\n")
    }

    fn render_notices(&self) -> String {
        let mut lines = Vec::new();
        if !self.operations.error().is_empty() {
            lines.push(format!("Error: {}", self.operations.error()));
        }
        if !self.operations.success().is_empty() {
            lines.push(self.operations.success().to_string());
        }
        lines.join("\n")
    }

    fn banner(&self) -> String {
        format!(
            "daily-habits {} ({}). Type 'help' for commands.\n{}",
            env!("CARGO_PKG_VERSION"),
            self.locale,
            self.render_day()
        )
    }

    async fn write<W: AsyncWrite + Unpin>(&self, output: &mut W, text: &str) -> std::io::Result<()> {
        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await
    }
}

/// Sleep until `deadline`, or forever when there is none
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending::<()>().await,
    }
}
