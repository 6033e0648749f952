//! Dashboard shell state, dispatch and error reporting.

use std::{
    io,
    path::{Path, PathBuf},
};

use dialoguer::{theme::ColorfulTheme, Confirm, MultiSelect};
use rust_decimal::Decimal;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::PresentationConfig;
use crate::core::Snapshot;
use crate::currency::format_money;
use crate::errors::ExpenseError;
use crate::ledger::{FilterSpec, RecordSet};
use crate::loader;

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single shell command; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No ledger loaded. Use `open <file>` first.")]
    NoLedger,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Expense(#[from] ExpenseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failure that ends the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Expense(#[from] ExpenseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// The ledger currently open in the shell.
#[derive(Debug, Clone)]
pub struct LoadedLedger {
    pub path: PathBuf,
    pub records: RecordSet,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config: &'static PresentationConfig,
    pub ledger: Option<LoadedLedger>,
    pub filter: FilterSpec,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode, config: &'static PresentationConfig) -> Self {
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            config,
            ledger: None,
            filter: FilterSpec::default(),
            last_command: None,
            running: true,
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        match self
            .ledger
            .as_ref()
            .and_then(|ledger| ledger.path.file_name())
        {
            Some(name) => format!("expense [{}]> ", name.to_string_lossy()),
            None => "expense> ".to_string(),
        }
    }

    /// Loads a ledger, replacing the current one and clearing the filter.
    pub(crate) fn open(&mut self, path: &Path) -> CommandResult {
        let records = loader::load(path)?;
        info!(path = %path.display(), records = records.len(), "ledger opened");
        let count = records.len();
        self.ledger = Some(LoadedLedger {
            path: path.to_path_buf(),
            records,
        });
        self.filter = FilterSpec::default();

        if count == 0 {
            output::warning(format!("{} contains no records.", path.display()));
        } else {
            output::success(format!("Loaded {} records from {}.", count, path.display()));
        }
        Ok(())
    }

    pub(crate) fn records(&self) -> Result<&RecordSet, CommandError> {
        self.ledger
            .as_ref()
            .map(|ledger| &ledger.records)
            .ok_or(CommandError::NoLedger)
    }

    /// Builds every view for the active filter. Prints the filtered/total
    /// counts, or a warning when nothing matches.
    pub(crate) fn snapshot(&self, top: usize) -> Result<Snapshot, CommandError> {
        let records = self.records()?;
        let snapshot = Snapshot::build(records, &self.filter, top);
        if snapshot.is_empty() {
            warn!(filter = %self.filter, "filter matches no records");
            output::warning("No records match the current filter.");
        } else {
            output::info(format!(
                "Showing {} of {} records ({}).",
                snapshot.records().len(),
                snapshot.source_len(),
                self.filter
            ));
        }
        Ok(snapshot)
    }

    pub(crate) fn set_filter(&mut self, filter: FilterSpec) {
        debug!(from = %self.filter, to = %filter, "filter changed");
        self.filter = filter;
    }

    pub(crate) fn money(&self, value: Decimal, precision: u32) -> String {
        format_money(&self.config.money, value, precision)
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    /// Multi-select picker; `None` when the user cancels.
    pub(crate) fn pick_many(
        &self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Result<Option<Vec<usize>>, CommandError> {
        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .defaults(checked)
            .interact_opt()
            .map_err(CommandError::from)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|definition| definition.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit dashboard?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::NoLedger => {
                output::error(CommandError::NoLedger);
                output::hint("Try `open data/expenses.xlsx`.");
            }
            CommandError::Expense(ExpenseError::NoData) => {
                output::warning("No records to show.");
            }
            other => output::error(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ShellContext {
        let config: &'static PresentationConfig = Box::leak(Box::new(PresentationConfig::default()));
        ShellContext::new(CliMode::Script, config)
    }

    #[test]
    fn views_require_an_open_ledger() {
        let context = context();
        assert!(matches!(context.records(), Err(CommandError::NoLedger)));
        assert_eq!(context.prompt(), "expense> ");
    }

    #[test]
    fn open_resets_filter_and_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        std::fs::write(&path, "date,item,amount,category\n2024-01-01,lunch,150,food\n").unwrap();

        let mut context = context();
        context.set_filter(FilterSpec::default().with_categories(["travel"]));
        context.open(&path).unwrap();
        assert!(context.filter.is_pass_through());
        assert_eq!(context.records().unwrap().len(), 1);
        assert_eq!(context.prompt(), "expense [ledger.csv]> ");
    }

    #[test]
    fn unknown_command_continues() {
        let mut context = context();
        let control = context.dispatch("overveiw", "overveiw", &[]).unwrap();
        assert_eq!(control, LoopControl::Continue);
    }

    #[test]
    fn exit_command_stops_loop() {
        let mut context = context();
        assert_eq!(context.dispatch("exit", "exit", &[]).unwrap(), LoopControl::Exit);
    }
}
