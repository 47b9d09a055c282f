//! Dossier - schema-driven document requirement extraction.

use clap::Parser;
use dossier_cli::{commands, Cli, CliError, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so stdout stays clean for results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> dossier_cli::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(color_enabled);

    if cli.list_schemas {
        let schemas_dir = cli
            .schemas_dir
            .as_deref()
            .unwrap_or(&config.settings.schemas_dir);
        return commands::execute_list(schemas_dir, &formatter);
    }

    let schema_path = cli.schema.as_deref().ok_or_else(|| {
        CliError::InvalidInput("A schema file is required. See --help for usage.".to_string())
    })?;

    if cli.info {
        return commands::execute_info(schema_path, &formatter);
    }

    let document_path = cli.document.as_deref().ok_or_else(|| {
        CliError::InvalidInput(
            "A document file is required when extracting. Use --info to inspect a schema."
                .to_string(),
        )
    })?;

    commands::execute_extract(
        schema_path,
        document_path,
        &cli.output,
        &config,
        cli.model.as_deref(),
        cli.model_url.as_deref(),
        &formatter,
    )
    .await
}
