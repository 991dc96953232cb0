use clap::Parser;
use colored::*;
use eyre::{eyre, Context, Result};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::commands::Commands;
use cli::Cli;
use jobdex::catalog::InMemoryCatalog;
use jobdex::config::DiscoveryConfig;
use jobdex::discovery::discover_all;
use jobdex::domain::JobSchema;
use jobdex::registry::JobSchemaRegistry;
use jobdex::validation::validate_values;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jobdex")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("jobdex.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn load_discovery_config(cli: &Cli) -> Result<DiscoveryConfig> {
    let mut config = match &cli.config {
        Some(path) => DiscoveryConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DiscoveryConfig::default(),
    };

    // Flags win over the config file
    if let Some(handler_interface) = &cli.handler_interface {
        config.handler_interface = handler_interface.clone();
    }
    if let Some(request_marker) = &cli.request_marker {
        config.request_marker = request_marker.clone();
    }

    Ok(config)
}

fn load_registry(cli: &Cli) -> Result<JobSchemaRegistry> {
    let catalog_path = cli
        .catalog
        .as_ref()
        .ok_or_else(|| eyre!("no catalog file given, pass --catalog <file>"))?;

    let catalog = InMemoryCatalog::from_file(catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", catalog_path.display()))?;

    let config = load_discovery_config(cli)?;
    info!(
        "Running discovery against {} (handler={}, marker={})",
        catalog_path.display(),
        config.handler_interface,
        config.request_marker
    );

    discover_all(&catalog, &config).context("Discovery failed")
}

fn run_application(cli: &Cli) -> Result<()> {
    info!("Starting application");

    if cli.verbose {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Discover => handle_discover_command(cli),
        Commands::Show { job } => handle_show_command(cli, job),
        Commands::Validate { job, values } => handle_validate_command(cli, job, values),
    }
}

fn handle_discover_command(cli: &Cli) -> Result<()> {
    let registry = load_registry(cli)?;

    if registry.is_empty() {
        println!("{}", "No jobs discovered".yellow());
        return Ok(());
    }

    let mut schemas: Vec<&JobSchema> = registry.all();
    schemas.sort_by(|a, b| a.job_type.cmp(&b.job_type));

    println!("{} {} job(s) discovered", "Discovered:".green(), schemas.len());
    for schema in schemas {
        let storage = if schema.uses_external_parameters {
            "external"
        } else {
            "inline"
        };
        println!(
            "  {} ({} parameters, {} storage) <- {}",
            schema.job_type.cyan(),
            schema.parameters.len(),
            storage,
            schema.handler_class
        );
        if cli.verbose {
            for parameter in &schema.parameters {
                let required = if parameter.required { "required" } else { "optional" };
                println!("      {} [{:?}, {}]", parameter.name, parameter.kind, required);
            }
        }
    }

    Ok(())
}

fn handle_show_command(cli: &Cli, job: &str) -> Result<()> {
    let registry = load_registry(cli)?;
    let schema = registry
        .get(job)
        .ok_or_else(|| eyre!("job '{}' not found in the registry", job))?;

    let json = serde_json::to_string_pretty(schema).context("Failed to render schema")?;
    println!("{json}");
    Ok(())
}

fn handle_validate_command(cli: &Cli, job: &str, pairs: &[String]) -> Result<()> {
    let registry = load_registry(cli)?;
    let schema = registry
        .get(job)
        .ok_or_else(|| eyre!("job '{}' not found in the registry", job))?;

    let values = parse_value_pairs(pairs)?;

    match validate_values(schema, &values) {
        Ok(()) => {
            println!("{} values are valid for '{}'", "OK:".green(), job);
            Ok(())
        }
        Err(errors) => {
            println!("{} {} problem(s) found", "Invalid:".red(), errors.len());
            for error in &errors {
                println!("  - {error}");
            }
            Err(eyre!("validation failed for job '{}'", job))
        }
    }
}

fn parse_value_pairs(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| eyre!("expected NAME=VALUE, got '{}'", pair))?;
        values.insert(name.to_string(), value.to_string());
    }
    Ok(values)
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli).context("Application failed")?;

    Ok(())
}
