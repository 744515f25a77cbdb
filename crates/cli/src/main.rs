// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `quill` binary: load config, compile styles, walk inputs, lint.

mod args;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use args::{Args, OutputStyle};
use quill_core::{Config, Severity};
use quill_lint::{Linter, found_problems, to_json, to_lines};
use quill_rules::Registry;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Expand directories into lintable files, honoring ignore files.
fn expand(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in ignore::WalkBuilder::new(path).build() {
            match entry {
                Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                    files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => log::warn!("skipping unreadable entry: {e}"),
            }
        }
    }
    files
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let mut config = if args.config.is_file() {
        Config::load(&args.config)
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        Config::default()
    };
    if let Some(level) = &args.min_alert_level {
        config.min_alert_level = level
            .parse::<Severity>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("--min-alert-level")?;
    }

    let registry = Registry::load(&config);
    let files = expand(&args.paths);
    let linter = Linter::new(&config, &registry);
    let (docs, lint_errors) = linter.lint_paths(&files, args.sort);

    let mut errors = registry.errors;
    errors.extend(lint_errors);

    match args.output {
        OutputStyle::Json => {
            let value = to_json(&docs, &errors);
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputStyle::Line => {
            // Diagnostics precede alert output, on stderr.
            for error in &errors {
                eprintln!("{error}");
            }
            for line in to_lines(&docs) {
                println!("{line}");
            }
        }
    }
    Ok(found_problems(&docs))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    match run(&args) {
        Ok(problems) => {
            if problems && !args.no_exit {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("quill: {e:#}");
            ExitCode::from(2)
        }
    }
}
