use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use policy_qa::{Answer, AnswerSheet, FlowState, ViewStatus, render_text};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::cmd::load_catalog;
use crate::config::WizardConfig;
use crate::driver::{Input, WizardDriver};
use crate::sink::{FileSink, ReportSink, WriterSink};

const HELP: &str = "Type an option number or id to answer. \
Commands: b = back, r = restart, q = quit, ? = help.";

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Catalog to use instead of the built-in security policy questionnaire
    #[arg(long, value_name = "catalog.json")]
    pub catalog: Option<PathBuf>,
    /// Answer the questionnaire from a file instead of prompting
    #[arg(long, value_name = "answers.json")]
    pub answers: Option<PathBuf>,
    /// Save the chosen answers so the run can be replayed
    #[arg(long = "answers-out", value_name = "answers.json")]
    pub answers_out: Option<PathBuf>,
    /// Directory receiving the dated report file
    #[arg(long = "out-dir", value_name = "DIR", conflicts_with = "output")]
    pub out_dir: Option<PathBuf>,
    /// Exact report file path
    #[arg(short, long, value_name = "report.md")]
    pub output: Option<PathBuf>,
    /// Print the report instead of writing a file
    #[arg(long, conflicts_with_all = ["output", "out_dir"])]
    pub stdout: bool,
    /// Prompt on stdin even when it is not a terminal
    #[arg(long)]
    pub interactive: bool,
    /// Print a JSON summary of the finished run
    #[arg(long)]
    pub json: bool,
}

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Quit,
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    catalog_id: &'a str,
    catalog_version: &'a str,
    state: FlowState,
    answers: &'a [Answer],
    #[serde(skip_serializing_if = "Option::is_none")]
    report_path: Option<PathBuf>,
    report: &'a str,
}

pub fn run(args: RunArgs, config: &WizardConfig) -> Result<()> {
    let catalog_path = args.catalog.as_deref().or(config.catalog.as_deref());
    let mut driver = WizardDriver::new(load_catalog(catalog_path)?);
    info!(
        catalog = %driver.catalog().id,
        questions = driver.catalog().len(),
        "catalog loaded"
    );

    if let Some(path) = &args.answers {
        let sheet = load_answer_sheet(path)?;
        driver
            .replay(&sheet)
            .with_context(|| format!("failed to replay answers from {}", path.display()))?;
    } else if args.interactive || (io::stdin().is_terminal() && io::stdout().is_terminal()) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        if run_interactive(&mut driver, &mut stdin.lock(), &mut stdout)? == Outcome::Quit {
            info!("questionnaire abandoned before completion");
            return Ok(());
        }
    } else {
        bail!(
            "no --answers file given and stdin is not a terminal; \
             pass --answers or --interactive"
        );
    }

    if let Some(path) = &args.answers_out {
        write_answer_sheet(&driver.answer_sheet(), path)?;
    }

    let report = driver.report();
    let report_path = if args.stdout {
        if !args.json {
            WriterSink::new(io::stdout().lock()).persist(&report)?;
        }
        None
    } else {
        let mut sink = file_sink(&args, config)?;
        sink.persist(&report)?
    };

    if args.json {
        let summary = RunSummary {
            catalog_id: &driver.catalog().id,
            catalog_version: &driver.catalog().version,
            state: driver.session().state(),
            answers: driver.session().answers(),
            report_path,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if let Some(path) = report_path {
        println!("Report written to {}", path.display());
    }
    Ok(())
}

/// Prompts until the session completes and the user confirms, or the user quits.
///
/// End of input before confirmation counts as quitting.
pub fn run_interactive<R, W>(
    driver: &mut WizardDriver,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{HELP}")?;
    loop {
        let view = driver.view();
        writeln!(out)?;
        writeln!(out, "{}", render_text(&view))?;
        if view.status == ViewStatus::Complete {
            write!(out, "Press Enter to generate the report (b = back, r = restart, q = quit): ")?;
        } else {
            write!(out, "> ")?;
        }
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Outcome::Quit);
        }

        match Input::parse(&line) {
            Input::Quit => return Ok(Outcome::Quit),
            Input::Help => writeln!(out, "{HELP}")?,
            Input::Restart => driver.restart(),
            Input::Back => {
                if let Err(err) = driver.go_back() {
                    writeln!(out, "{err}")?;
                }
            }
            Input::Empty if view.status == ViewStatus::Complete => return Ok(Outcome::Completed),
            Input::Empty => {}
            Input::Choose(_) if view.status == ViewStatus::Complete => {
                writeln!(out, "The questionnaire is complete; go back to change an answer.")?;
            }
            Input::Choose(choice) => {
                if let Err(err) = driver.choose(&choice) {
                    writeln!(out, "{err}")?;
                }
            }
        }
    }
}

fn load_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read answers {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("answers file {} is not valid JSON", path.display()))?;
    // Plain `{ "question": "option" }` maps are accepted as well as full sheets.
    let sheet = if value.get("answers").is_some_and(serde_json::Value::is_object) {
        serde_json::from_value(value)?
    } else {
        AnswerSheet {
            answers: serde_json::from_value(value).with_context(|| {
                format!(
                    "answers file {} must map question ids to option ids",
                    path.display()
                )
            })?,
            ..AnswerSheet::default()
        }
    };
    Ok(sheet)
}

fn write_answer_sheet(sheet: &AnswerSheet, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create answers-out parent {}", parent.display())
        })?;
    }
    fs::write(path, sheet.to_json_pretty()?)
        .with_context(|| format!("failed to write answers {}", path.display()))
}

fn file_sink(args: &RunArgs, config: &WizardConfig) -> Result<FileSink> {
    if let Some(path) = &args.output {
        return Ok(FileSink::at(path));
    }
    let dir = args
        .out_dir
        .as_deref()
        .or(config.output_dir.as_deref())
        .unwrap_or(Path::new("."));
    FileSink::in_dir(dir, &config.file_prefix, OffsetDateTime::now_utc().date())
}
