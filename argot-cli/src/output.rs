//! Console rendering of dispatch results.

use argot_core::{DispatchError, Outcome};
use colored::Colorize;

/// Print help and any rejection notice. Executed commands print nothing here.
pub fn render_outcome(outcome: &Outcome) {
    if let Outcome::Help { reason, text } = outcome {
        if let Some(reason) = reason {
            println!("{}", reason.to_string().bright_yellow().bold());
        }
        print!("{}", colorize_help(text));
    }
}

pub fn render_error(err: &DispatchError) {
    eprintln!("{} {}", "error:".bright_red().bold(), err);
}

pub fn render_verbose(command: &str) {
    println!("{}", format!("[VERBOSE] Command {} executed successfully.", command).dimmed());
}

/// Section headings are underlined, entry names highlighted.
fn colorize_help(text: &str) -> String {
    let mut rendered = String::with_capacity(text.len());
    for line in text.lines() {
        match line.strip_prefix("  ") {
            Some(entry) => {
                let (name, description) = match entry.split_once(" - ") {
                    Some((name, description)) => (name, Some(description)),
                    None => (entry, None),
                };
                rendered.push_str(&format!("  {}", name.bright_green()));
                if let Some(description) = description {
                    rendered.push_str(&format!(" - {}", description.bright_white()));
                }
            }
            None => rendered.push_str(&line.underline().bright_blue().to_string()),
        }
        rendered.push('\n');
    }
    rendered
}
