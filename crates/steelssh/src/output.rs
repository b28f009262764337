//! Output formatting: the device listing, sub-menu, and `list -o`.
//!
//! Table uses `tabled`, structured formats use serde, plain emits one
//! node id per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use steelssh_core::{Directory, DirectoryEntry, SessionAction};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Marker appended to the id of an entry with an open tunnel.
const ACTIVE_MARKER: &str = "*";

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct DirectoryRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Organisation")]
    organization: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Serial")]
    serial: String,
}

impl DirectoryRow {
    fn new(id: usize, entry: &DirectoryEntry) -> Self {
        let marker = if entry.active_tunnel { ACTIVE_MARKER } else { "" };
        Self {
            id: format!("{id}{marker}"),
            organization: entry.organization.clone(),
            site: entry.site.clone(),
            model: entry.model.clone(),
            serial: entry.serial.clone(),
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// The numbered device listing. Ids are 1-based and match
/// [`Directory::select`].
pub fn render_directory_table(directory: &Directory) -> String {
    let rows: Vec<DirectoryRow> = directory
        .iter()
        .enumerate()
        .map(|(idx, entry)| DirectoryRow::new(idx + 1, entry))
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render the directory in the format chosen with `list -o`.
pub fn render_directory(format: OutputFormat, directory: &Directory) -> Result<String, CliError> {
    let out = match format {
        OutputFormat::Table => render_directory_table(directory),
        OutputFormat::Json => serde_json::to_string_pretty(directory).map_err(internal)?,
        OutputFormat::JsonCompact => serde_json::to_string(directory).map_err(internal)?,
        OutputFormat::Yaml => serde_yaml::to_string(directory).map_err(internal)?,
        OutputFormat::Plain => directory
            .iter()
            .map(|e| e.node_id.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(out)
}

fn internal(err: impl std::fmt::Display) -> CliError {
    CliError::Internal(format!("serialization failed: {err}"))
}

/// The per-device sub-menu, numbered from 1.
pub fn render_actions(entry: &DirectoryEntry, actions: &[SessionAction], color: bool) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let title = format!("Select how to setup tunnel to {}", entry.site);
    if color {
        let _ = writeln!(out, "{}", title.bold());
    } else {
        let _ = writeln!(out, "{title}");
    }
    for (idx, action) in actions.iter().enumerate() {
        let number = idx + 1;
        if color {
            let _ = writeln!(out, "  {} {action}", number.cyan());
        } else {
            let _ = writeln!(out, "  {number} {action}");
        }
    }
    out
}

/// Print rendered output to stdout.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
