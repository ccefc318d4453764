use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use tracing::{debug, warn};

use crate::cli::commands::argument_keys;
use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::info as output_info;
use crate::errors::CliError;
use crate::utils::SCRIPT_ENV;

/// Runs the questionnaire shell until `exit`, end of input, or a confirmed interrupt.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

const HISTORY_FILE: &str = "history.txt";

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    let history = context.home.join(HISTORY_FILE);
    if editor.load_history(&history).is_err() {
        debug!(path = %history.display(), "no shell history yet");
    }

    output_info(format!(
        "Vendor onboarding questionnaire. {}% complete. Type `help` to get started.",
        context.store.progress()
    ));

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if let Err(err) = step(context, trimmed) {
                    context.report_error(err)?;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting questionnaire.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Err(err) = editor.save_history(&history) {
        warn!(error = %err, "failed to save shell history");
    }
    Ok(())
}

/// Reads one command per stdin line. Blank lines and `#` comments are skipped.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Err(err) = step(context, trimmed) {
            context.report_error(err)?;
        }
    }
    Ok(())
}

fn step(context: &mut ShellContext, line: &str) -> Result<(), CommandError> {
    if handle_line(context, line)? == LoopControl::Exit {
        context.running = false;
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            crate::cli::io::print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(line.trim().to_string());

    context.dispatch(&command, raw, &args)
}

struct CommandHelper {
    commands: Vec<String>,
    arguments: HashMap<&'static str, Vec<&'static str>>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            arguments: argument_keys(),
        }
    }

    fn candidates<'a>(&'a self, line: &str, start: usize) -> Vec<&'a str> {
        let head = line[..start].trim();
        if head.is_empty() {
            return self.commands.iter().map(String::as_str).collect();
        }
        let mut words = head.split_whitespace();
        match (words.next(), words.next()) {
            (Some(command), None) => self
                .arguments
                .get(command.to_ascii_lowercase().as_str())
                .map(|keys| keys.to_vec())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);

        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .candidates(prefix, start)
            .into_iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line("set business-name \"Acme Media\"").expect("parses");
        assert_eq!(tokens, vec!["set", "business-name", "Acme Media"]);
        assert!(parse_command_line("set business-name \"unterminated").is_err());
    }

    #[test]
    fn completion_offers_field_keys_after_field_commands() {
        let helper = CommandHelper::new(vec!["set", "toggle", "status"]);
        assert!(helper.candidates("", 0).contains(&"status"));
        assert!(helper.candidates("toggle ", 7).contains(&"environments"));
        assert!(helper.candidates("toggle environments ", 20).is_empty());
        assert!(helper.candidates("status ", 7).is_empty());
    }
}
