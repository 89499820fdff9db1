//! Output rendering and formatting

use amo_types::{ColorChoice, DownloadProgress, InstallStatus, OutputFormat};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use serde::Serialize;
use std::io;

use crate::replay::{AddonSummary, ReplayReport};

/// Result of a command, ready to render
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandResult {
    Replay(ReplayReport),
    Explain { code: String, message: &'static str },
}

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    color_choice: ColorChoice,
    term: Term,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat, color_choice: ColorChoice) -> Self {
        Self {
            format,
            color_choice,
            term: Term::stdout(),
        }
    }

    pub fn render_result(&self, result: &CommandResult) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(result).map_err(io::Error::other)?;
                println!("{json}");
                Ok(())
            }
            OutputFormat::Tty | OutputFormat::Plain => match result {
                CommandResult::Replay(report) => self.render_replay(report),
                CommandResult::Explain { code, message } => {
                    println!("{}: {message}", self.style_bold(code));
                    Ok(())
                }
            },
        }
    }

    fn render_replay(&self, report: &ReplayReport) -> io::Result<()> {
        for failure in &report.failures {
            let action = failure.action.unwrap_or("?");
            eprintln!("line {}: {action}: {}", failure.line, failure.message);
        }

        if report.addons.is_empty() {
            println!("No add-ons tracked.");
        } else if self.format == OutputFormat::Plain {
            for addon in &report.addons {
                println!(
                    "{}\t{}\t{}\t{}",
                    addon.guid,
                    addon.status,
                    format_progress(addon.progress),
                    addon.error.as_ref().map_or("-".to_string(), ToString::to_string)
                );
            }
        } else {
            self.render_table(&report.addons);
        }

        println!(
            "{} applied, {} rejected",
            report.applied,
            report.failures.len()
        );
        Ok(())
    }

    fn render_table(&self, addons: &[AddonSummary]) {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Add-on").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Progress").add_attribute(Attribute::Bold),
            Cell::new("Uninstallable").add_attribute(Attribute::Bold),
            Cell::new("Restart").add_attribute(Attribute::Bold),
            Cell::new("Error").add_attribute(Attribute::Bold),
        ]);

        for addon in addons {
            table.add_row(vec![
                Cell::new(addon.guid.as_str()),
                self.format_status(addon.status),
                Cell::new(format_progress(addon.progress)),
                Cell::new(yes_no(addon.can_uninstall)),
                Cell::new(yes_no(addon.needs_restart)),
                Cell::new(addon.error_message.unwrap_or("-")),
            ]);
        }

        println!("{table}");
    }

    fn format_status(&self, status: InstallStatus) -> Cell {
        let cell = Cell::new(status.as_str());
        if !self.supports_color() {
            return cell;
        }
        match status {
            InstallStatus::Enabled | InstallStatus::Installed => cell.fg(Color::Green),
            InstallStatus::Error => cell.fg(Color::Red),
            InstallStatus::Disabled | InstallStatus::Inactive => cell.fg(Color::Yellow),
            status if status.is_transitional() => cell.fg(Color::Blue),
            _ => cell,
        }
    }

    fn style_bold(&self, text: &str) -> String {
        if self.supports_color() {
            Style::new().bold().apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

fn format_progress(progress: Option<DownloadProgress>) -> String {
    match progress {
        Some(DownloadProgress::Percent(percent)) => percent.to_string(),
        Some(DownloadProgress::Filling) => "filling".to_string(),
        Some(DownloadProgress::Emptying) => "emptying".to_string(),
        None => "-".to_string(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
