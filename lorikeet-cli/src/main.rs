//! Lorikeet CLI
//!
//! A headless contrast auditor for testing and batch use: scan a document
//! JSON for WCAG 2.1 contrast issues, or apply a bulk color fix to one
//! issue group and write the document back.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use lorikeet_audit::{AuditReport, ContrastIssue, EngineMessage, Session, apply_fix};
use lorikeet_color::Color;
use lorikeet_common::warning::warn_once;
use lorikeet_scene::{NodeId, SceneGraph, parse_document, to_document};

#[derive(Parser)]
#[command(name = "lorikeet", version, about = "WCAG 2.1 contrast auditor for layered design documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a document for contrast issues
    Scan {
        /// Path to the document JSON
        file: PathBuf,
        /// Comma-separated host ids of the subtrees to audit
        /// (defaults to the whole page)
        #[arg(long)]
        roots: Option<String>,
        /// Page background color as #RRGGBB
        #[arg(long, default_value = "#FFFFFF")]
        page_background: String,
        /// Emit the raw scan-result message as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply a bulk color fix to one failing group and write the document
    Fix {
        /// Path to the document JSON
        file: PathBuf,
        /// 1-based index of the failing group, as listed by `scan`
        #[arg(long)]
        issue: usize,
        /// Replacement foreground color as #RRGGBB
        #[arg(long)]
        fg: Option<String>,
        /// Replacement background color as #RRGGBB
        #[arg(long)]
        bg: Option<String>,
        /// Output path (defaults to rewriting the input file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Command::Scan {
            file,
            roots,
            page_background,
            json,
        } => scan(&file, roots.as_deref(), &page_background, json),
        Command::Fix {
            file,
            issue,
            fg,
            bg,
            output,
        } => fix(&file, issue, fg.as_deref(), bg.as_deref(), output.as_deref()),
    }
}

fn scan(file: &Path, roots: Option<&str>, page_background: &str, json: bool) -> Result<ExitCode> {
    let (graph, background) = load(file, page_background)?;
    let selection = select_roots(&graph, roots)?;
    let session = Session::new(graph, selection, background);
    let report = session.scan();

    if report.truncated {
        warn_once("Audit", "traversal limits reached; results may be incomplete");
    }

    if json {
        let message = EngineMessage::ScanResult {
            all: report.all(),
            issues: report.issues.clone(),
            passed: report.passed.clone(),
            truncated: report.truncated,
        };
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        print_report(file, &report);
    }

    Ok(if report.issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn fix(
    file: &Path,
    issue_index: usize,
    fg: Option<&str>,
    bg: Option<&str>,
    output: Option<&Path>,
) -> Result<ExitCode> {
    if fg.is_none() && bg.is_none() {
        bail!("nothing to fix: pass --fg and/or --bg");
    }

    let (graph, background) = load(file, "#FFFFFF")?;
    let mut session = Session::for_document(graph, background);
    let report = session.scan();

    if issue_index == 0 || issue_index > report.issues.len() {
        bail!(
            "issue {issue_index} out of range: scan found {} failing group(s)",
            report.issues.len()
        );
    }
    let issue: &ContrastIssue = &report.issues[issue_index - 1];

    let mut graph = session.into_graph();
    let summary = apply_fix(&mut graph, issue, fg, bg);
    println!(
        "repainted {} node(s), skipped {}",
        summary.repainted.to_string().green(),
        summary.skipped
    );

    let target = output.unwrap_or(file);
    write_graph(&graph, target)
        .with_context(|| format!("failed to write document to {}", target.display()))?;
    println!("wrote {}", target.display());
    Ok(ExitCode::SUCCESS)
}

/// Load a document file and the page-background configuration point.
fn load(file: &Path, page_background: &str) -> Result<(SceneGraph, Color)> {
    let Some(background) = Color::from_hex(page_background) else {
        bail!("invalid page background `{page_background}`: expected #RRGGBB");
    };
    let json = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let graph = parse_document(&json)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    Ok((graph, background))
}

/// Resolve `--roots` to node handles; the whole page when absent.
fn select_roots(graph: &SceneGraph, roots: Option<&str>) -> Result<Vec<NodeId>> {
    let Some(roots) = roots else {
        return Ok(vec![graph.root()]);
    };
    let mut selection = Vec::new();
    for host_id in roots.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some(id) = graph.lookup(host_id) else {
            bail!("no node with id `{host_id}` in the document");
        };
        selection.push(id);
    }
    if selection.is_empty() {
        bail!("--roots given but no ids parsed");
    }
    Ok(selection)
}

fn write_graph(graph: &SceneGraph, target: &Path) -> Result<()> {
    let document = to_document(graph);
    let json = serde_json::to_string_pretty(&document)?;
    fs::write(target, json)?;
    Ok(())
}

fn print_report(file: &Path, report: &AuditReport) {
    println!("== Contrast audit: {} ==", file.display());

    if report.issues.is_empty() {
        println!("{}", "no failing color pairs".green());
    }
    for (index, group) in report.issues.iter().enumerate() {
        println!(
            "{} [{}] {} on {}  ratio {:.2}  needs {} (AA{})  {}  {}",
            "✗".red().bold(),
            index + 1,
            group.foreground_hex,
            group.background_hex,
            group.ratio,
            group.required_aa,
            group
                .required_aaa
                .map_or_else(String::new, |aaa| format!(", {aaa} AAA")),
            group.element_type,
            describe_members(group),
        );
    }

    println!(
        "\n{} failing group(s), {} passing group(s)",
        report.issues.len(),
        report.passed.len()
    );
    if report.truncated {
        println!("{}", "note: traversal was truncated; results may be incomplete".yellow());
    }
}

fn describe_members(group: &ContrastIssue) -> String {
    const SHOWN: usize = 5;
    let shown: Vec<&str> = group.node_ids.iter().take(SHOWN).map(String::as_str).collect();
    if group.node_ids.len() > SHOWN {
        format!(
            "{} element(s): {}, …",
            group.node_ids.len(),
            shown.join(", ")
        )
    } else {
        format!("{} element(s): {}", group.node_ids.len(), shown.join(", "))
    }
}
