//! Core CLI dispatch and shell context helpers.

use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use intake_config::ConfigManager;
use intake_core::{resume, CoreError, ResumeSource, SaveError};
use intake_domain::{DomainError, FormId};
use intake_storage_json::JsonFormGateway;
use strsim::levenshtein;
use tracing::warn;

use crate::errors::CliError;
use crate::utils;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_home(mode, utils::app_data_dir(), utils::requested_form())
    }

    /// Builds a shell rooted at `home`, opening `requested` (a form id) when given.
    pub fn with_home(
        mode: CliMode,
        home: PathBuf,
        requested: Option<String>,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "config unreadable, using defaults");
                cli_io::print_warning(format!("Ignoring unreadable config: {}", err));
                Default::default()
            }
        };
        cli_io::apply_config(&config);

        let gateway = JsonFormGateway::new(config.resolve_forms_root(&home))?;
        let requested = requested.and_then(|raw| match raw.parse::<FormId>() {
            Ok(id) => Some(id),
            Err(err) => {
                cli_io::print_warning(err.to_string());
                None
            }
        });
        let (store, source) = resume(Box::new(gateway), requested, config.last_form_id);

        let mut app = ShellContext {
            mode,
            registry,
            store,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            home,
            last_command: None,
            running: true,
        };
        app.report_resume(requested, source);
        Ok(app)
    }

    fn report_resume(&mut self, requested: Option<FormId>, source: ResumeSource) {
        match source {
            ResumeSource::Requested(id) => {
                cli_io::print_success(format!("Opened form {}.", id.short()));
                self.remember_form(Some(id));
            }
            ResumeSource::Remembered(id) => {
                cli_io::print_info(format!("Resumed form {}.", id.short()));
            }
            ResumeSource::Fresh => {
                if let Some(id) = requested {
                    cli_io::print_warning(format!(
                        "Form {} could not be opened. Starting a new form.",
                        id
                    ));
                }
                if self.config.last_form_id.is_some() {
                    self.remember_form(None);
                }
            }
        }
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!(
            "intake [{} {}%]> ",
            self.store.active_section().key(),
            self.store.progress()
        )
    }

    /// Persists the form to reopen on the next start.
    pub(crate) fn remember_form(&mut self, id: Option<FormId>) {
        if self.config.last_form_id == id {
            return;
        }
        self.config.last_form_id = id;
        if let Err(err) = self.config_manager.save(&self.config) {
            warn!(error = %err, "failed to persist last form id");
            cli_io::print_warning(format!("Could not update config: {}", err));
        }
    }

    /// Accepts a full form id or a unique prefix of one.
    pub(crate) fn resolve_form_id(&self, raw: &str) -> Result<FormId, CommandError> {
        if let Ok(id) = raw.parse::<FormId>() {
            return Ok(id);
        }
        let needle = raw.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(CommandError::InvalidArguments("form id required".into()));
        }
        let matches: Vec<FormId> = self
            .store
            .list_forms()?
            .into_iter()
            .map(|summary| summary.id)
            .filter(|id| id.to_string().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [id] => Ok(*id),
            [] => Err(CommandError::InvalidArguments(format!(
                "no saved form matches `{}`",
                raw
            ))),
            _ => Err(CommandError::InvalidArguments(format!(
                "`{}` matches {} forms; use a longer prefix",
                raw,
                matches.len()
            ))),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
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

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell? Unsaved answers will be lost.")
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Domain(err) => {
                cli_io::print_error(err.to_string());
                cli_io::print_hint("Run the command without a value to list the valid keys.");
                Ok(())
            }
            CommandError::Save(SaveError::Invalid(failure)) => {
                cli_io::print_error(&failure.message);
                for label in &failure.missing {
                    cli_io::print_info(format!("  missing: {}", label));
                }
                cli_io::print_hint(format!(
                    "Switched to the {} section.",
                    failure.section.title()
                ));
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    home: PathBuf,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_home(CliMode::Script, home, None)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_domain::{Environment, Section, SubmissionStatus};

    fn home() -> tempfile::TempDir {
        tempfile::tempdir().expect("create temp home")
    }

    #[test]
    fn edits_flow_through_to_the_store() {
        let dir = home();
        let app = process_script(
            dir.path().to_path_buf(),
            &[
                "set business-name \"Acme Media\"",
                "toggle environments web",
                "choose operation-type both",
            ],
        )
        .expect("script runs");

        let answers = app.store.answers();
        assert_eq!(answers.business_name, "Acme Media");
        assert!(answers.environments.contains(&Environment::Web));
        assert!(app.store.visibility().web_technical);
        assert!(app.store.progress() > 0);
    }

    #[test]
    fn draft_save_is_remembered_for_the_next_session() {
        let dir = home();
        let app = process_script(
            dir.path().to_path_buf(),
            &["set business-name Acme", "save"],
        )
        .expect("script runs");
        let id = app.store.form_id().expect("draft saved");
        assert_eq!(app.store.status(), Some(SubmissionStatus::Draft));
        assert_eq!(app.config.last_form_id, Some(id));

        let resumed = ShellContext::with_home(CliMode::Script, dir.path().to_path_buf(), None)
            .expect("shell restarts");
        assert_eq!(resumed.store.form_id(), Some(id));
        assert_eq!(resumed.store.answers().business_name, "Acme");
    }

    #[test]
    fn failed_submit_switches_to_the_incomplete_section() {
        let dir = home();
        let app = process_script(
            dir.path().to_path_buf(),
            &["toggle environments web", "section web", "submit"],
        )
        .expect("script runs");
        assert_eq!(app.store.active_section(), Section::Generic);
        assert!(app.store.form_id().is_none());
        assert!(app.store.error().is_some());
    }

    #[test]
    fn unknown_commands_do_not_stop_the_script() {
        let dir = home();
        let app = process_script(
            dir.path().to_path_buf(),
            &["stauts", "set business-name Acme", "exit", "set business-name Other"],
        )
        .expect("script runs");
        assert_eq!(app.store.answers().business_name, "Acme");
    }

    #[test]
    fn prefixes_resolve_to_saved_forms() {
        let dir = home();
        let app = process_script(dir.path().to_path_buf(), &["save"]).expect("script runs");
        let id = app.store.form_id().expect("saved");
        let prefix = id.short();
        assert_eq!(app.resolve_form_id(&prefix).expect("resolves"), id);
        assert!(app.resolve_form_id("zzzz").is_err());
    }

    #[test]
    fn invalid_requested_form_falls_back_to_fresh() {
        let dir = home();
        let app = ShellContext::with_home(
            CliMode::Script,
            dir.path().to_path_buf(),
            Some("not-a-form".into()),
        )
        .expect("shell starts");
        assert!(app.store.form_id().is_none());
        assert_eq!(app.mode(), CliMode::Script);
    }
}
