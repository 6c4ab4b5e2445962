//! boldfix CLI - repair bold spans in Chinese Markdown

mod diff;
mod json;

use boldfix_core::{
    collect_markdown_files, fix_project, list_posts, scan_project, BoldFixConfig, Diagnostic,
    FileFailure, IssueRule,
};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = ".boldfix.toml";

#[derive(Parser)]
#[command(name = "boldfix")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Repair **bold** spans in Chinese Markdown",
    long_about = "Find and fix **bold** spans that Markdown renderers fail to recognise in CJK text.\n\nChecks: split-strong • unparsed-strong • flush-strong"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to check (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report problems without changing files
    Check {
        /// File or directory to check
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Rewrite files with bold spans repaired
    Fix {
        /// File or directory to fix
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Print a unified diff for every changed file
        #[arg(long)]
        diff: bool,

        /// Skip the confirmation prompt when fixing a directory
        #[arg(short, long)]
        yes: bool,
    },

    /// List blog posts, newest first
    Posts {
        /// Directory holding the posts
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Initialize config file
    Init {
        /// Output path for config
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Check { path, format }) => check_command(path, *format, &cli),
        Some(Commands::Fix {
            path,
            dry_run,
            diff,
            yes,
        }) => fix_command(path, *dry_run, *diff, *yes, &cli),
        Some(Commands::Posts { dir }) => posts_command(dir),
        Some(Commands::Init { output }) => init_command(output),
        None => check_command(&cli.path, OutputFormat::Text, &cli),
    };

    match result {
        Ok(code) => {
            if code != 0 {
                process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // stdout carries reports and JSON, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

/// `--config` must load; otherwise `.boldfix.toml` is used when present
fn load_config(cli: &Cli) -> anyhow::Result<BoldFixConfig> {
    if let Some(path) = &cli.config {
        return Ok(BoldFixConfig::load(path)?);
    }
    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Ok(BoldFixConfig::load(local)?);
    }
    Ok(BoldFixConfig::default())
}

fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

fn print_failures(failures: &[FileFailure], base: &Path) {
    for failure in failures {
        eprintln!(
            "{} {}: {}",
            "warning:".yellow().bold(),
            display_path(&failure.file, base),
            failure.message
        );
    }
}

fn rule_label(rule: IssueRule) -> ColoredString {
    match rule {
        IssueRule::SplitStrong => rule.as_str().red().bold(),
        IssueRule::UnparsedStrong => rule.as_str().yellow().bold(),
        IssueRule::FlushStrong => rule.as_str().blue().bold(),
    }
}

fn print_diagnostic(diag: &Diagnostic, base: &Path, verbose: bool) {
    println!(
        "{}:{}:{} {}: {}",
        display_path(&diag.file, base).dimmed(),
        diag.issue.line,
        diag.issue.column,
        rule_label(diag.issue.rule),
        diag.issue.message
    );
    if verbose {
        println!("  {} {}", "|".dimmed(), diag.issue.snippet);
    }
}

fn check_command(path: &Path, format: OutputFormat, cli: &Cli) -> anyhow::Result<i32> {
    let config = load_config(cli)?;
    let report = scan_project(path, &config)?;

    if format == OutputFormat::Json {
        let output = json::scan_to_json(&report, path);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(if report.diagnostics.is_empty() { 0 } else { 1 });
    }

    println!("{} {}", "Checking:".cyan().bold(), path.display());
    println!();
    print_failures(&report.failures, path);

    if report.diagnostics.is_empty() {
        println!(
            "{} ({} {} checked)",
            "✓ No issues found".green().bold(),
            report.files_checked,
            if report.files_checked == 1 { "file" } else { "files" }
        );
        return Ok(0);
    }

    for diag in &report.diagnostics {
        print_diagnostic(diag, path, cli.verbose);
    }

    let count = report.diagnostics.len();
    println!();
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "Found {} {} in {} {}",
        count,
        if count == 1 { "issue" } else { "issues" },
        report.files_checked,
        if report.files_checked == 1 { "file" } else { "files" }
    );
    println!("Run {} to repair them", "boldfix fix".bold());

    Ok(1)
}

/// Ask on stdin; anything other than y/yes declines
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn fix_command(
    path: &Path,
    dry_run: bool,
    show_diff: bool,
    yes: bool,
    cli: &Cli,
) -> anyhow::Result<i32> {
    let config = load_config(cli)?;

    if path.is_dir() && !dry_run && !yes {
        let count = collect_markdown_files(path, &config)?.len();
        if count == 0 {
            println!("No Markdown files under {}", path.display());
            return Ok(0);
        }
        let prompt = format!("Fix {} Markdown files under {}?", count, path.display());
        if !confirm(&prompt)? {
            println!("Aborted.");
            return Ok(0);
        }
    }

    let report = fix_project(path, &config, dry_run)?;
    print_failures(&report.failures, path);

    let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    for result in &report.changed {
        let name = display_path(&result.path, path);
        let verb = if dry_run { "Would fix" } else { "Fixed" };
        println!(
            "{} {} {} ({} joined, {} spaces)",
            "✓".green().bold(),
            verb,
            name,
            result.joined_lines,
            result.insertions
        );
        if show_diff {
            print!("{}", diff::unified_diff(&name, &result.original, &result.fixed, color));
        }
    }

    let changed = report.changed.len();
    println!();
    println!(
        "{} {} of {} {}",
        if dry_run { "Would change" } else { "Changed" },
        changed,
        report.files_checked,
        if report.files_checked == 1 { "file" } else { "files" }
    );

    Ok(if report.failures.is_empty() { 0 } else { 1 })
}

fn posts_command(dir: &Path) -> anyhow::Result<i32> {
    let posts = list_posts(dir)?;
    if posts.is_empty() {
        println!("No posts found in {}", dir.display());
        return Ok(0);
    }

    println!("{} ({})", "Posts, newest first:".cyan().bold(), posts.len());
    println!();
    for (index, post) in posts.iter().enumerate() {
        println!("  {:>3}. {}", index + 1, post.file_name);
        let title = post.title.as_deref().unwrap_or("(untitled)");
        println!("       {}", title.dimmed());
    }

    Ok(0)
}

fn init_command(output: &Path) -> anyhow::Result<i32> {
    let default_config = BoldFixConfig::default();
    let toml_content = toml::to_string_pretty(&default_config)?;

    std::fs::write(output, toml_content)?;

    println!(
        "{} Created config file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(0)
}
