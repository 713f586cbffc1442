//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use layoutcheck_core::{CaseReport, LayoutElement, Snapshot, SuiteResult};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Colored report with a summary table
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

impl TableDisplay for LayoutElement {
    fn headers() -> Vec<&'static str> {
        vec!["#", "Tag", "Type", "Content", "Rect", "Visible", "Clipped"]
    }

    fn row(&self) -> Vec<String> {
        let clipped = match &self.visibility {
            Some(v) if v.is_clipped => v.clipped_sides().join(", "),
            Some(_) => "no".to_string(),
            None => "-".to_string(),
        };
        vec![
            String::new(),
            self.tag.clone(),
            self.element_type.clone().unwrap_or_default(),
            truncate(self.content(), 40),
            self.raw_box.to_string(),
            self.visible_box.to_string(),
            clipped,
        ]
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn print_json<T: Serialize + ?Sized>(item: &T) {
    println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
}

/// Print one case: the ✓/✗ line, then its errors and warnings
pub fn print_case(report: &CaseReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Plain => print!("{}", report),
        OutputFormat::Table => {
            let line = report.summary_line();
            if report.passed {
                println!("{}", line.green());
            } else {
                println!("{}", line.red().bold());
            }
            for error in &report.errors {
                println!("  {} {}", "ERROR:".red(), error);
            }
            if !report.errors.is_empty() && !report.warnings.is_empty() {
                println!("  {}: {} warning(s)", report.name, report.warnings.len());
            }
            for warning in &report.warnings {
                println!("  {} {}", "WARNING:".yellow(), warning);
            }
        }
    }
}

/// Print every case followed by the aggregate summary
pub fn print_suite(result: &SuiteResult, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_json(result);
        return;
    }

    for report in &result.results {
        print_case(report, format);
    }

    if format == OutputFormat::Table && !result.results.is_empty() {
        let mut table = new_table();
        table.set_header(vec!["Case", "Status", "Errors", "Warnings", "Time"]);
        for report in &result.results {
            let status = if report.passed {
                Cell::new("pass").fg(Color::Green)
            } else {
                Cell::new("FAIL").fg(Color::Red)
            };
            let errors = if report.fatal.is_some() {
                "fatal".to_string()
            } else {
                report.errors.len().to_string()
            };
            table.add_row(vec![
                Cell::new(&report.name),
                status,
                Cell::new(errors),
                Cell::new(report.warnings.len()),
                Cell::new(format!("{} ms", report.duration_ms)),
            ]);
        }
        println!();
        println!("{table}");
    }

    println!();
    let summary = result.summary_line();
    match format {
        OutputFormat::Table if result.all_passed() && result.total > 0 => println!("{}", summary.green().bold()),
        OutputFormat::Table => println!("{}", summary.red().bold()),
        _ => println!("{}", summary),
    }
}

/// Print the elements of a snapshot with any lint findings
pub fn print_snapshot(snapshot: &Snapshot, lint: &[String], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Inspection<'a> {
                snapshot: &'a Snapshot,
                lint: &'a [String],
            }
            print_json(&Inspection { snapshot, lint });
            return;
        }
        OutputFormat::Table => {
            println!(
                "Viewport: {}x{}, {} element(s)",
                snapshot.viewport.width,
                snapshot.viewport.height,
                snapshot.elements.len()
            );
            let mut table = new_table();
            table.set_header(LayoutElement::headers());
            for (i, element) in snapshot.elements.iter().enumerate() {
                let mut row = element.row();
                row[0] = i.to_string();
                table.add_row(row);
            }
            println!("{table}");
        }
        OutputFormat::Plain => {
            println!("Viewport: {}x{}", snapshot.viewport.width, snapshot.viewport.height);
            for element in &snapshot.elements {
                let content = element.content();
                if content.is_empty() {
                    println!("{} at {}", element.tag, element.raw_box);
                } else {
                    println!("{} '{}' at {}", element.tag, truncate(content, 40), element.raw_box);
                }
            }
        }
    }

    for finding in lint {
        print_warning(finding);
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow(), msg);
}
