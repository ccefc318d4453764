pub mod build_info;

use std::{env, path::PathBuf, sync::Once};

use intake_config::Config;

static TRACING_INIT: Once = Once::new();

/// Overrides the data root (forms and config).
pub const HOME_ENV: &str = "VENDOR_INTAKE_HOME";
/// Form id to open at start-up.
pub const FORM_ENV: &str = "VENDOR_INTAKE_FORM";
/// Switches the shell to script mode, reading commands from stdin.
pub const SCRIPT_ENV: &str = "VENDOR_INTAKE_CLI_SCRIPT";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Logs go to stderr so scripted stdout stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "vendor_intake=info".parse() {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Returns the application data directory, honouring `VENDOR_INTAKE_HOME`.
pub fn app_data_dir() -> PathBuf {
    match env::var_os(HOME_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => Config::default_home(),
    }
}

/// Raw form id requested through `VENDOR_INTAKE_FORM`, if any.
pub fn requested_form() -> Option<String> {
    env::var(FORM_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
