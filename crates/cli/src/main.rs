use crate::{
    commands::{Commands, DialectKind},
    error::CliError,
};
use clap::Parser;
use expression_engine::{SymbolicBuilder, check_balance, compile};
use model::{FilterExpr, validation::validate_filter};
use planner::{Condition, ConditionBuilder, FilterPlan};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "dynfilter",
    version = "0.1.0",
    about = "Compile and run saved filter expressions"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "DYNFILTER_REGISTRY",
        help = "Model registry file path (JSON)"
    )]
    registry: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry_path = cli.registry.as_deref();

    match cli.command {
        Commands::Compile {
            filter,
            dialect,
            symbolic,
            json,
        } => {
            let filter = config::load_filter(&filter).await?;
            if symbolic {
                print_symbolic(&filter, json)?;
            } else {
                let registry = config::load_registry(registry_path).await?;
                let plan = FilterPlan::build(&registry, &filter)?;
                print_plan(&plan, dialect, json)?;
            }
        }
        Commands::Check { filter, json } => {
            let filter = config::load_filter(&filter).await?;
            check(&filter, registry_path, json).await?;
        }
        Commands::Apply {
            filter,
            records,
            output,
        } => {
            let filter = config::load_filter(&filter).await?;
            let records = config::load_records(&records).await?;
            let condition = resolve_condition(&filter, registry_path).await?;

            let matched = condition.filter(&records);
            info!("{} of {} records matched", matched.len(), records.len());

            match output {
                Some(path) => output::write_json(&matched, &path).await?,
                None => output::print_json(&matched)?,
            }
        }
        Commands::Fields { model } => {
            let registry = config::load_registry(registry_path).await?;
            let schema = registry.resolve(&model)?;
            print!("{}", output::format_choices(&schema.choices()));
        }
        Commands::Models => {
            let registry = config::load_registry(registry_path).await?;
            for (qualified, name) in registry.model_choices() {
                println!("{qualified:<32} {name}");
            }
        }
    }

    Ok(())
}

fn print_symbolic(filter: &FilterExpr, as_json: bool) -> Result<(), CliError> {
    let terms: Vec<_> = filter.ordered_terms().into_iter().cloned().collect();
    let grouping = compile(&SymbolicBuilder, &terms)?;
    let condition = compile(&ConditionBuilder::new(), &terms)?;

    if as_json {
        output::print_json(&json!({
            "grouping": grouping,
            "condition": condition.to_string(),
        }))
    } else {
        println!("{grouping}");
        println!("{condition}");
        Ok(())
    }
}

fn print_plan(plan: &FilterPlan, dialect: DialectKind, as_json: bool) -> Result<(), CliError> {
    let rendered = plan.render(dialect.dialect());
    if as_json {
        output::print_json(&json!({
            "name": plan.name,
            "model": plan.model,
            "condition": plan.condition.to_string(),
            "query": rendered,
        }))
    } else {
        print!("{}", output::format_query(&plan.condition.to_string(), &rendered));
        Ok(())
    }
}

/// Schema-checked condition when a registry is available, unchecked otherwise.
async fn resolve_condition(
    filter: &FilterExpr,
    registry_path: Option<&str>,
) -> Result<Condition, CliError> {
    if registry_path.is_none() {
        warn!("No model registry given; field names are not checked");
        let terms: Vec<_> = filter.ordered_terms().into_iter().cloned().collect();
        return Ok(compile(&ConditionBuilder::new(), &terms)?);
    }

    let registry = config::load_registry(registry_path).await?;
    Ok(FilterPlan::build(&registry, filter)?.condition)
}

async fn check(
    filter: &FilterExpr,
    registry_path: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let issues = validate_filter(filter);
    let mut structure = check_balance(filter.ordered_terms()).err().map(|e| e.to_string());

    if issues.is_empty() && structure.is_none() && registry_path.is_some() {
        let registry = config::load_registry(registry_path).await?;
        if let Err(err) = FilterPlan::build(&registry, filter) {
            structure = Some(err.to_string());
        }
    }

    if as_json {
        println!("{}", output::issues_json(&issues, structure.as_deref())?);
    } else {
        print!("{}", output::format_issues(&issues, structure.as_deref()));
    }

    let problems = issues.len() + usize::from(structure.is_some());
    if problems > 0 {
        return Err(CliError::InvalidFilter(problems));
    }
    Ok(())
}
