use std::collections::HashMap;

use intake_domain::{ChoiceField, FlagField, SetField, TextField, TrafficChannel};

use crate::cli::registry::CommandRegistry;

pub mod answers;
pub mod form;
pub mod system;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(form::definitions())
        .chain(answers::definitions())
    {
        registry.register(entry);
    }
}

/// Keys accepted as the first argument of each field-addressing command.
pub(crate) fn argument_keys() -> HashMap<&'static str, Vec<&'static str>> {
    let mut keys = HashMap::new();
    keys.insert("set", TextField::ALL.iter().map(|field| field.key()).collect());
    keys.insert("flag", FlagField::ALL.iter().map(|field| field.key()).collect());
    keys.insert("toggle", SetField::ALL.iter().map(|field| field.key()).collect());
    keys.insert("choose", ChoiceField::ALL.iter().map(|field| field.key()).collect());
    keys.insert(
        "traffic",
        TrafficChannel::ALL.iter().map(|channel| channel.key()).collect(),
    );
    keys.insert("section", vec!["generic", "web", "ctv"]);
    keys.insert("fields", vec!["generic", "web", "ctv"]);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_registered_once() {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        let names: Vec<_> = registry.names().collect();
        for expected in [
            "help", "version", "exit", "status", "section", "fields", "show", "save", "submit",
            "list", "open", "delete", "new", "set", "flag", "toggle", "choose", "traffic", "eids",
        ] {
            assert!(names.contains(&expected), "missing `{expected}`");
        }
        assert_eq!(names.len(), 19);
    }
}
