// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputStyle {
    /// `path:line:col:check:message`, one line per alert.
    #[default]
    Line,
    /// The stable JSON map, one key per file.
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "quill", version, about = "A syntax-aware linter for prose")]
pub struct Args {
    /// Files or directories to lint.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Project configuration file.
    #[arg(long, default_value = "quill.toml")]
    pub config: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub output: OutputStyle,

    /// Override the configured minimum alert level.
    #[arg(long, value_name = "LEVEL")]
    pub min_alert_level: Option<String>,

    /// Emit files in lexicographic path order instead of arrival order.
    #[arg(long)]
    pub sort: bool,

    /// Always exit 0, even with alerts.
    #[arg(long)]
    pub no_exit: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let args = Args::parse_from(["quill", "docs/"]);
        assert_eq!(args.output, OutputStyle::Line);
        assert!(!args.sort);
        assert_eq!(args.config, PathBuf::from("quill.toml"));
    }

    #[test]
    fn flags_parse() {
        let args = Args::parse_from([
            "quill",
            "--output",
            "json",
            "--sort",
            "--no-exit",
            "--min-alert-level",
            "error",
            "README.md",
        ]);
        assert_eq!(args.output, OutputStyle::Json);
        assert!(args.sort && args.no_exit);
        assert_eq!(args.min_alert_level.as_deref(), Some("error"));
    }
}
