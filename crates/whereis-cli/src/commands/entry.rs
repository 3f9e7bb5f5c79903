//! Entry screen shown when no subcommand is given

use crate::output::{Output, OutputFormat};

const TITLE: &str = "Where Is App";
const TAGLINE: &str = "Keep track of important items with ease";

/// Actions reachable from the entry screen, as (command, summary)
const ACTIONS: &[(&str, &str)] = &[
    ("add", "Add a new record"),
    ("list", "View and search records"),
    ("show <id>", "Show a record"),
    ("edit <id>", "Edit a record"),
    ("delete <id>", "Delete a record"),
    ("config", "Show or set configuration"),
];

pub fn show(output: &Output) {
    match output.format {
        OutputFormat::Human => {
            println!("{}", TITLE);
            println!("{}", TAGLINE);
            println!();
            for (command, summary) in ACTIONS {
                println!("  whereis {:<12} {}", command, summary);
            }
        }
        OutputFormat::Json => {
            let actions: Vec<_> = ACTIONS
                .iter()
                .map(|(command, summary)| serde_json::json!({"command": command, "summary": summary}))
                .collect();
            println!(
                "{}",
                serde_json::json!({"title": TITLE, "tagline": TAGLINE, "actions": actions})
            );
        }
        OutputFormat::Quiet => {}
    }
}
