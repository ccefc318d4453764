use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use intake_config::{Config, ConfigManager};
use intake_core::FormStateStore;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: the open form, config and shell state.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: FormStateStore,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub home: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}
