use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandGroup, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    for group in CommandGroup::ALL {
        let entries = registry.in_group(group);
        if entries.is_empty() {
            continue;
        }
        output_section(format!("{} commands", group.title()));
        for entry in entries {
            io::print_info(format!("  {:<8} {}", entry.name, entry.description));
        }
    }
    io::print_hint("Use `help <command>` for details. Field commands list their keys when run without arguments.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
}
