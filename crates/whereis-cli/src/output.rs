//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use whereis_core::{CommandOutcome, ItemRecord};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render whatever a dispatched command produced
    pub fn print_outcome(&self, outcome: &CommandOutcome) {
        match outcome {
            CommandOutcome::Created(record) => {
                self.success("Record has been saved successfully!");
                self.print_record(record);
            }
            CommandOutcome::Updated(Some(record)) => {
                self.success("Record has been updated successfully!");
                self.print_record(record);
            }
            CommandOutcome::Updated(None) => {
                self.message("No record with that id. Nothing was changed.");
            }
            CommandOutcome::Deleted(true) => self.success("Record deleted"),
            CommandOutcome::Deleted(false) => {
                self.message("No record with that id. Nothing was deleted.");
            }
            CommandOutcome::Found(Some(record)) => self.print_record(record),
            CommandOutcome::Found(None) => self.message("Record not found."),
            CommandOutcome::Listed(records) => self.print_records(records),
        }
    }

    /// Print a single record with every field
    pub fn print_record(&self, record: &ItemRecord) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", record.id);
                println!("Name:        {}", record.name);
                println!("Description: {}", record.description);
                if let Some(ref photo) = record.photo_path {
                    println!("Photo:       {}", photo);
                }
                if let Some(ref location) = record.location {
                    println!("Coordinates: {}", location);
                }
                if let Some(created) = record.id.created_at() {
                    println!("Created:     {}", created.format("%Y-%m-%d %H:%M"));
                }
            }
            OutputFormat::Json => print_json(record),
            OutputFormat::Quiet => println!("{}", record.id),
        }
    }

    /// Print a list of records
    pub fn print_records(&self, records: &[ItemRecord]) {
        match self.format {
            OutputFormat::Human => {
                if records.is_empty() {
                    println!("No records found.");
                    return;
                }
                for record in records {
                    println!("{}", list_line(record));
                }
                println!("\n{} record(s)", records.len());
            }
            OutputFormat::Json => print_json(&records),
            OutputFormat::Quiet => {
                for record in records {
                    println!("{}", record.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode output as JSON: {}", e),
    }
}

/// One listing row: short id, name, and markers for photo and GPS
fn list_line(record: &ItemRecord) -> String {
    let mut markers = String::new();
    if record.photo_path.is_some() {
        markers.push_str(" [photo]");
    }
    if record.location.is_some() {
        markers.push_str(" [gps]");
    }
    format!(
        "{} | {}{}",
        record.id.short(),
        truncate(&record.name, 40),
        markers
    )
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
