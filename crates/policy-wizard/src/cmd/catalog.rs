use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use policy_qa::builtin::SECURITY_POLICY_JSON;
use policy_qa::{Catalog, Severity, validate};

use crate::cmd::load_catalog;
use crate::config::WizardConfig;

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommand {
    /// Print the questions and options of a catalog
    Show(ShowArgs),
    /// Check a catalog for authoring defects
    Validate(ValidateArgs),
    /// Print the JSON Schema of the catalog format
    Schema,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    #[arg(long, value_name = "catalog.json")]
    pub catalog: Option<PathBuf>,
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Catalog file; defaults to the built-in catalog
    #[arg(value_name = "catalog.json")]
    pub path: Option<PathBuf>,
    /// Print the validation report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(command: CatalogCommand, config: &WizardConfig) -> Result<()> {
    match command {
        CatalogCommand::Show(args) => show(args, config),
        CatalogCommand::Validate(args) => validate_catalog(args, config),
        CatalogCommand::Schema => {
            let schema = serde_json::to_string_pretty(&Catalog::json_schema())?;
            println!("{schema}");
            Ok(())
        }
    }
}

fn show(args: ShowArgs, config: &WizardConfig) -> Result<()> {
    let path = args.catalog.as_deref().or(config.catalog.as_deref());
    let catalog = load_catalog(path)?;
    if args.json {
        println!("{}", catalog.to_json_pretty()?);
    } else {
        print!("{}", describe(&catalog));
    }
    Ok(())
}

/// Plain text outline of a catalog.
pub fn describe(catalog: &Catalog) -> String {
    let mut out = format!("{} ({} {})\n", catalog.title, catalog.id, catalog.version);
    for (index, question) in catalog.questions().iter().enumerate() {
        out.push_str(&format!(
            "\n{}. [{}] {}\n",
            index + 1,
            question.id,
            question.prompt
        ));
        if let Some(section) = &question.section {
            out.push_str(&format!("   section: {section}\n"));
        }
        if let Some(rule) = &question.continue_when {
            let continuing = question
                .options
                .iter()
                .filter(|option| !option.exit_workflow && rule.permits(&option.id))
                .map(|option| option.id.as_str())
                .collect::<Vec<_>>();
            out.push_str(&format!("   continues after: {}\n", continuing.join(", ")));
        }
        for option in &question.options {
            out.push_str(&format!("   - {}: {}", option.id, option.text));
            if option.exit_workflow {
                out.push_str(&format!(
                    " (exits: {})",
                    option.exit_message.as_deref().unwrap_or_default()
                ));
            }
            out.push('\n');
        }
    }
    out
}

fn validate_catalog(args: ValidateArgs, config: &WizardConfig) -> Result<()> {
    let (label, raw) = match args.path.as_ref().or(config.catalog.as_ref()) {
        Some(path) => (
            path.display().to_string(),
            fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?,
        ),
        None => ("built-in catalog".to_string(), SECURITY_POLICY_JSON.to_string()),
    };
    let catalog: Catalog = serde_json::from_str(&raw)
        .with_context(|| format!("{label} is not a well-formed catalog"))?;
    let report = validate(&catalog);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for issue in &report.issues {
            let severity = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            let location = match (&issue.question_id, &issue.option_id) {
                (Some(question), Some(option)) => format!(" {question}/{option}"),
                (Some(question), None) => format!(" {question}"),
                _ => String::new(),
            };
            eprintln!("{severity}[{}]{location}: {}", issue.code, issue.message);
        }
    }

    if !report.is_valid() {
        bail!("{label} has {} error(s)", report.errors().count());
    }
    if !args.json {
        println!("{label} is valid ({} warning(s))", report.warnings().count());
    }
    Ok(())
}
