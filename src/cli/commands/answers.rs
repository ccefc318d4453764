//! Answer editing commands. Each one maps its arguments to a single store update.

use intake_core::FieldUpdate;
use intake_domain::{
    parse_flag, Choice, ChoiceField, FlagField, Member, Region, SetField, TextField,
    TrafficChannel,
};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandGroup};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "set",
            CommandGroup::Answers,
            "Set a free-text answer (omit the value to clear it)",
            "set <field> [value...]",
            cmd_set,
        ),
        CommandEntry::new(
            "flag",
            CommandGroup::Answers,
            "Answer a yes/no question",
            "flag <field> <yes|no>",
            cmd_flag,
        ),
        CommandEntry::new(
            "toggle",
            CommandGroup::Answers,
            "Select or deselect options of a multi-select question",
            "toggle <field> [option...]",
            cmd_toggle,
        ),
        CommandEntry::new(
            "choose",
            CommandGroup::Answers,
            "Pick the option of a single-choice question",
            "choose <field> [option|clear]",
            cmd_choose,
        ),
        CommandEntry::new(
            "traffic",
            CommandGroup::Answers,
            "Set the traffic share of one region",
            "traffic <channel> <region> <value>",
            cmd_traffic,
        ),
        CommandEntry::new(
            "eids",
            CommandGroup::Answers,
            "Show or replace the supported EIDs list",
            "eids [type...|clear]",
            cmd_eids,
        ),
    ]
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((raw, rest)) = args.split_first() else {
        list_keys("Text fields", TextField::ALL.iter().map(|field| field.key()));
        return Ok(());
    };
    let field = TextField::parse(raw)?;
    let value = rest.join(" ");
    apply(context, FieldUpdate::Text(field, value.trim().to_string()));
    io::print_success(format!("Updated `{}`.", field.key()));
    Ok(())
}

fn cmd_flag(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (raw, value) = match args {
        [] => {
            list_keys("Yes/no fields", FlagField::ALL.iter().map(|field| field.key()));
            return Ok(());
        }
        [raw] => {
            let field = FlagField::parse(raw)?;
            let current = if field.get(context.store.answers()) {
                "yes"
            } else {
                "no"
            };
            io::print_info(format!("{} = {}", field.key(), current));
            return Ok(());
        }
        [raw, value, ..] => (*raw, *value),
    };
    let field = FlagField::parse(raw)?;
    let value = parse_flag(value)?;
    apply(context, FieldUpdate::Flag(field, value));
    io::print_success(format!(
        "`{}` set to {}.",
        field.key(),
        if value { "yes" } else { "no" }
    ));
    Ok(())
}

fn cmd_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((raw, options)) = args.split_first() else {
        list_keys("Multi-select fields", SetField::ALL.iter().map(|field| field.key()));
        return Ok(());
    };
    let field = SetField::parse(raw)?;
    if options.is_empty() {
        output_section(format!("Options for `{}`", field.key()));
        for key in field.option_keys() {
            let member = Member::parse(field, key)?;
            let marker = if member.is_selected_in(context.store.answers()) {
                "[x]"
            } else {
                "[ ]"
            };
            io::print_info(format!("  {} {}", marker, key));
        }
        return Ok(());
    }

    // Parse everything first so a typo leaves the selection untouched.
    let members = options
        .iter()
        .map(|option| Member::parse(field, option))
        .collect::<Result<Vec<_>, _>>()?;
    for member in members {
        let label = member_label(&member);
        apply(context, FieldUpdate::Toggle(member.clone()));
        let state = if member.is_selected_in(context.store.answers()) {
            "selected"
        } else {
            "deselected"
        };
        io::print_success(format!("{} {}.", label, state));
    }
    Ok(())
}

fn cmd_choose(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((raw, rest)) = args.split_first() else {
        list_keys(
            "Single-choice fields",
            ChoiceField::ALL.iter().map(|field| field.key()),
        );
        return Ok(());
    };
    let field = ChoiceField::parse(raw)?;
    let Some(value) = rest.first() else {
        list_keys(
            &format!("Options for `{}`", field.key()),
            field.option_keys().iter().copied(),
        );
        return Ok(());
    };
    let choice = Choice::parse(field, value)?;
    let cleared = choice_is_cleared(&choice);
    apply(context, FieldUpdate::Choose(choice));
    if cleared {
        io::print_success(format!("Cleared `{}`.", field.key()));
    } else {
        io::print_success(format!("`{}` set to {}.", field.key(), value));
    }
    Ok(())
}

fn cmd_traffic(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [channel, region, value @ ..] => {
            let channel = TrafficChannel::parse(channel)?;
            let region = Region::parse(region)?;
            let value = value.join(" ");
            apply(
                context,
                FieldUpdate::Traffic(channel, region, value.trim().to_string()),
            );
            io::print_success(format!(
                "{} traffic for {} updated.",
                channel.key(),
                region.title()
            ));
            Ok(())
        }
        _ => {
            list_keys(
                "Traffic channels",
                TrafficChannel::ALL.iter().map(|channel| channel.key()),
            );
            list_keys("Regions", Region::ALL.iter().map(|region| region.key()));
            Err(CommandError::InvalidArguments(
                "usage: traffic <channel> <region> <value>".into(),
            ))
        }
    }
}

fn cmd_eids(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        let eids = &context.store.answers().ortb_technical.cookie_matching.eids_types;
        if eids.is_empty() {
            io::print_info("No EIDs listed.");
        } else {
            output_section("Supported EIDs");
            for eid in eids {
                io::print_info(format!("  {}", eid));
            }
        }
        return Ok(());
    }
    let text = if matches!(args, [only] if only.eq_ignore_ascii_case("clear")) {
        String::new()
    } else {
        args.join("\n")
    };
    apply(context, FieldUpdate::Eids(text));
    let count = context
        .store
        .answers()
        .ortb_technical
        .cookie_matching
        .eids_types
        .len();
    io::print_success(format!("EIDs list now has {} entries.", count));
    Ok(())
}

/// Applies one update and reports the progress change, if any.
fn apply(context: &mut ShellContext, update: FieldUpdate) {
    let before = context.store.progress();
    context.store.apply(update);
    let after = context.store.progress();
    if before != after {
        io::print_hint(format!("Progress: {}% -> {}%", before, after));
    }
}

fn list_keys<'a>(title: &str, keys: impl Iterator<Item = &'a str>) {
    output_section(title);
    for key in keys {
        io::print_info(format!("  {}", key));
    }
}

fn member_label(member: &Member) -> String {
    use intake_domain::LabelledOption;

    match member {
        Member::Environment(value) => value.label().to_string(),
        Member::Format(value) => value.label().to_string(),
        Member::OwnedOperated(value) => value.label().to_string(),
        Member::Intermediary(value) => value.label().to_string(),
        Member::AppStore(value) => value.label().to_string(),
        Member::WebIntegration(value) => value.label().to_string(),
        Member::WebDataCenter(value) | Member::CtvDataCenter(value) => value.label().to_string(),
        Member::WebSensitive(value) | Member::CtvSensitive(value) => value.label().to_string(),
        Member::OrtbImpressionTracking(value) | Member::CtvImpressionTracking(value) => {
            value.label().to_string()
        }
        Member::CtvIntegration(value) => value.label().to_string(),
    }
}

fn choice_is_cleared(choice: &Choice) -> bool {
    match choice {
        Choice::OperationType(value) => value.is_none(),
        Choice::ResoldProportion(value) | Choice::IntermediaryProportion(value) => {
            value.is_none()
        }
        Choice::ChildDirectedPortion(value) => value.is_none(),
        Choice::WebPreferredIntegration(value) => value.is_none(),
        Choice::CtvPreferredIntegration(value) => value.is_none(),
        Choice::BurlTiming(value) => value.is_none(),
    }
}

#[cfg(test)]
mod tests {
    use intake_domain::{AppStore, Environment, ProportionBucket};

    use crate::cli::core::process_script;

    #[test]
    fn toggling_twice_restores_the_selection() {
        let dir = tempfile::tempdir().expect("temp home");
        let app = process_script(
            dir.path().to_path_buf(),
            &[
                "toggle environments web ctv-ott",
                "toggle environments web",
                "toggle environments web",
            ],
        )
        .expect("script runs");
        let environments = &app.store.answers().environments;
        assert!(environments.contains(&Environment::Web));
        assert!(environments.contains(&Environment::CtvOtt));
        assert_eq!(environments.len(), 2);
    }

    #[test]
    fn a_bad_option_leaves_the_selection_untouched() {
        let dir = tempfile::tempdir().expect("temp home");
        let app = process_script(
            dir.path().to_path_buf(),
            &["toggle app-stores roku smart-fridge"],
        )
        .expect("script runs");
        assert!(!app.store.answers().app_stores.contains(&AppStore::Roku));
    }

    #[test]
    fn flags_choices_and_traffic_reach_the_answers() {
        let dir = tempfile::tempdir().expect("temp home");
        let app = process_script(
            dir.path().to_path_buf(),
            &[
                "flag has-sellers-json yes",
                "set sellers-json-url https://example.com/sellers.json",
                "choose resold-proportion 26-50",
                "traffic web-display emea 40%",
                "eids id5 uid2 id5",
                "flag has-sellers-json no",
            ],
        )
        .expect("script runs");
        let answers = app.store.answers();
        assert!(!answers.has_sellers_json);
        assert!(answers.sellers_json_url.is_empty());
        assert_eq!(
            answers.resold_inventory_proportion,
            Some(ProportionBucket::UpToHalf)
        );
        assert_eq!(answers.web_technical.traffic_percentage.display.emea, "40%");
        assert_eq!(
            answers.ortb_technical.cookie_matching.eids_types,
            vec!["id5".to_string(), "uid2".to_string()]
        );
    }

    #[test]
    fn choices_can_be_cleared() {
        let dir = tempfile::tempdir().expect("temp home");
        let app = process_script(
            dir.path().to_path_buf(),
            &["choose operation-type both", "choose operation-type clear"],
        )
        .expect("script runs");
        assert_eq!(app.store.answers().operation_type, None);
    }
}
