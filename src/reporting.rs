// src/reporting.rs
//! Console output for `docgen` runs.

use crate::artifacts::ErrorRecord;
use crate::pipeline::DocRun;
use colored::Colorize;
use std::path::Path;

/// Progress printer that can be silenced with `--quiet`.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    quiet: bool,
}

impl Console {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn step(&self, label: &str, path: &Path) {
        if !self.quiet {
            println!("=> {label:<8}{}", path.display());
        }
    }

    pub fn wrote(&self, what: &str, path: &Path) {
        if !self.quiet {
            println!("{what} → {}", path.display().to_string().cyan());
        }
    }

    pub fn notice(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.yellow());
        }
    }

    /// Errors are printed even in quiet mode.
    pub fn error(&self, msg: &str) {
        eprintln!("{} {msg}", "error:".red().bold());
    }

    pub fn syntax_errors(&self, errors: &[ErrorRecord]) {
        for e in errors {
            let at = match (e.start_line, e.end_line) {
                (Some(s), Some(end)) if s != end => format!("lines {s}-{end}"),
                (Some(s), _) => format!("line {s}"),
                _ => String::new(),
            };
            eprintln!("  {} {}", at.dimmed(), e.message);
        }
    }

    pub fn summary(&self, run: &DocRun) {
        if self.quiet {
            return;
        }
        if run.fragment {
            let note = "Fragment detected; producing a preview instead of an in-place edit.";
            println!("{}", note.dimmed());
        }
        let total = run.items.len();
        match &run.generation {
            None => println!("{total} item(s) tagged; generation skipped."),
            Some(g) if g.missing.is_empty() => println!(
                "{}",
                format!("✓ Documented {}/{total} item(s).", g.docs.len()).green().bold()
            ),
            Some(g) => {
                let missing: Vec<String> = g.missing.iter().map(ToString::to_string).collect();
                println!(
                    "{}",
                    format!(
                        "Documented {}/{total} item(s); missing: {}",
                        g.docs.len(),
                        missing.join(", ")
                    )
                    .yellow()
                );
            }
        }
    }
}
