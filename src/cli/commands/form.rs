//! Form lifecycle commands: navigation, saving, and stored-form management.

use chrono::{DateTime, Local, Utc};
use intake_core::{visible_fields, SaveOutcome};
use intake_domain::{Section, SubmissionStatus};

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{render_table, section as output_section};
use crate::cli::registry::{CommandEntry, CommandGroup};

const SAVED_MESSAGE: &str = "Progress saved! You can return to complete the form later.";
const SUBMITTED_MESSAGE: &str = "Form submitted successfully!";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            CommandGroup::Form,
            "Show the open form, its progress and visible sections",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "section",
            CommandGroup::Form,
            "List sections or switch the active section",
            "section [generic|web|ctv]",
            cmd_section,
        ),
        CommandEntry::new(
            "fields",
            CommandGroup::Form,
            "List the questions visible in a section",
            "fields [generic|web|ctv]",
            cmd_fields,
        ),
        CommandEntry::new(
            "show",
            CommandGroup::Form,
            "Print the current answers as JSON",
            "show",
            cmd_show,
        ),
        CommandEntry::new(
            "save",
            CommandGroup::Form,
            "Save the form as a draft",
            "save",
            cmd_save,
        ),
        CommandEntry::new(
            "submit",
            CommandGroup::Form,
            "Validate and submit the form",
            "submit",
            cmd_submit,
        ),
        CommandEntry::new(
            "list",
            CommandGroup::Form,
            "List saved forms, newest first",
            "list",
            cmd_list,
        ),
        CommandEntry::new(
            "open",
            CommandGroup::Form,
            "Open a saved form",
            "open <id|prefix>",
            cmd_open,
        ),
        CommandEntry::new(
            "delete",
            CommandGroup::Form,
            "Delete a saved form",
            "delete <id|prefix>",
            cmd_delete,
        ),
        CommandEntry::new(
            "new",
            CommandGroup::Form,
            "Discard the current answers and start a new form",
            "new",
            cmd_new,
        ),
    ]
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = &context.store;
    output_section("Questionnaire");
    match store.form_id() {
        Some(id) => io::print_info(format!(
            "  Form     : {} ({})",
            id,
            store
                .status()
                .map(|status| status.to_string())
                .unwrap_or_else(|| "unsaved".into())
        )),
        None => io::print_info("  Form     : not saved yet"),
    }
    io::print_info(format!("  Section  : {}", store.active_section().title()));
    io::print_info(format!("  Progress : {}%", store.progress()));

    let rows: Vec<Vec<String>> = store
        .progress_breakdown()
        .into_iter()
        .map(|counts| {
            vec![
                counts.section.title().to_string(),
                format!("{}/{}", counts.filled, counts.total),
            ]
        })
        .collect();
    render_table(&["Section", "Required answered"], &rows);

    if let Some(error) = store.error() {
        io::print_warning(error);
    }
    Ok(())
}

fn cmd_section(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let visibility = context.store.visibility();
    let Some(raw) = args.first() else {
        output_section("Sections");
        for section in visibility.sections() {
            let marker = if section == context.store.active_section() {
                "*"
            } else {
                " "
            };
            io::print_info(format!("  {} {:<8} {}", marker, section.key(), section.title()));
        }
        return Ok(());
    };

    let section = Section::parse(raw)?;
    if !visibility.shows(section) {
        return Err(CommandError::InvalidArguments(format!(
            "The {} section does not apply to the current answers",
            section.title()
        )));
    }
    context.store.set_active_section(section);
    io::print_success(format!("Switched to the {} section.", section.title()));
    Ok(())
}

fn cmd_fields(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let section = match args.first() {
        Some(raw) => Section::parse(raw)?,
        None => context.store.active_section(),
    };
    let answers = context.store.answers();
    let visibility = context.store.visibility();
    let rows: Vec<Vec<String>> = visible_fields(answers)
        .into_iter()
        .filter(|requirement| requirement.section == section)
        .map(|requirement| {
            vec![
                requirement.key.to_string(),
                requirement.label.to_string(),
                if requirement.is_required(answers, &visibility) {
                    "yes".into()
                } else {
                    "".into()
                },
                if requirement.is_satisfied(answers) {
                    "yes".into()
                } else {
                    "no".into()
                },
            ]
        })
        .collect();

    output_section(section.title());
    if rows.is_empty() {
        io::print_info("No questions apply to this section for the current answers.");
        return Ok(());
    }
    render_table(&["Field", "Question", "Required", "Answered"], &rows);
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let json = serde_json::to_string_pretty(context.store.answers())?;
    println!("{}", json);
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = context.store.save(SubmissionStatus::Draft)?;
    finish(context, outcome, SAVED_MESSAGE);
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = context.store.save(SubmissionStatus::Submitted)?;
    finish(context, outcome, SUBMITTED_MESSAGE);
    Ok(())
}

fn finish(context: &mut ShellContext, outcome: SaveOutcome, message: &str) {
    io::print_success(message);
    io::print_info(format!("Form id: {}", outcome.id));
    context.remember_form(Some(outcome.id));
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let forms = context.store.list_forms()?;
    if forms.is_empty() {
        io::print_info("No saved forms yet.");
        return Ok(());
    }
    let open = context.store.form_id();
    let rows: Vec<Vec<String>> = forms
        .iter()
        .map(|form| {
            let marker = if Some(form.id) == open { "*" } else { "" };
            vec![
                format!("{}{}", form.id.short(), marker),
                if form.business_name.trim().is_empty() {
                    "(unnamed)".into()
                } else {
                    form.business_name.clone()
                },
                form.status.to_string(),
                local_time(form.created_at),
                local_time(form.updated_at),
            ]
        })
        .collect();
    render_table(&["Id", "Business", "Status", "Created", "Updated"], &rows);
    Ok(())
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: open <id|prefix>".into()))?;
    let id = context.resolve_form_id(raw)?;
    context.store.load_form(id)?;
    context.remember_form(Some(id));
    io::print_success(format!(
        "Opened form {} ({}% complete).",
        id.short(),
        context.store.progress()
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: delete <id|prefix>".into()))?;
    let id = context.resolve_form_id(raw)?;
    if context.mode() == CliMode::Interactive && context.config.confirm_deletes {
        let prompt = format!("Delete form {}? This cannot be undone.", id.short());
        if !io::confirm_action(&context.theme, &prompt)? {
            io::print_info("Deletion cancelled.");
            return Ok(());
        }
    }
    context.store.delete_form(id)?;
    if context.config.last_form_id == Some(id) {
        context.remember_form(None);
    }
    io::print_success(format!("Deleted form {}.", id.short()));
    Ok(())
}

fn cmd_new(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.store.start_new()?;
    context.remember_form(None);
    io::print_success("Started a new form.");
    Ok(())
}
