//! Output management and formatting.

use std::io;

use console::Term;
use owo_colors::OwoColorize;
use strata_core::domain::{ArtifactOutcome, GenerationReport};

use crate::cli::global::GlobalArgs;
use crate::config::AppConfig;

const BANNER: &str = r"
     _             _
 ___| |_ _ __ __ _| |_ __ _
/ __| __| '__/ _` | __/ _` |
\__ \ |_| | | (_| | || (_| |
|___/\__|_|  \__,_|\__\__,_|
";

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    no_banner: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            no_banner: args.no_banner,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Program banner with version; suppressed by `--no-banner` and quiet mode.
    pub fn banner(&self) -> io::Result<()> {
        if self.quiet || self.no_banner {
            return Ok(());
        }
        let version = format!("  v{}  layered Go service scaffolding", strata_core::VERSION);
        if self.no_color {
            self.term.write_line(BANNER)?;
            self.term.write_line(&version)?;
        } else {
            self.term.write_line(&BANNER.cyan().bold().to_string())?;
            self.term.write_line(&version.dimmed().to_string())?;
        }
        self.term.write_line("")
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode; errors
    /// must always be visible.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Counts for a finished run, then one line per failed artifact.
    ///
    /// Failures are printed even in quiet mode.
    pub fn summary(&self, report: &GenerationReport) -> io::Result<()> {
        for line in summary_lines(report) {
            match line {
                SummaryLine::Counts(text) if report.is_complete() => self.success(&text)?,
                SummaryLine::Counts(text) => self.warning(&text)?,
                SummaryLine::Failure(text) => self.error(&text)?,
                SummaryLine::DirectoryFailure(text) => self.warning(&text)?,
            }
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[derive(Debug, PartialEq)]
enum SummaryLine {
    Counts(String),
    Failure(String),
    DirectoryFailure(String),
}

fn summary_lines(report: &GenerationReport) -> Vec<SummaryLine> {
    let mut lines = vec![SummaryLine::Counts(format!(
        "{}: {} generated, {} disabled, {} failed",
        report.mode,
        report.generated_count(),
        report.disabled_count(),
        report.failed_count(),
    ))];

    for dir in &report.directory_failures {
        lines.push(SummaryLine::DirectoryFailure(format!(
            "could not create {}: {}",
            dir.path.display(),
            dir.reason
        )));
    }
    for artifact in report.failed() {
        if let ArtifactOutcome::Failed { reason } = &artifact.outcome {
            lines.push(SummaryLine::Failure(format!(
                "{} ({}): {reason}",
                artifact.path.display(),
                artifact.template
            )));
        }
    }
    lines
}

// ── tests ─────────────────────────────────────────────────────────────────────
