// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value,
    clippy::too_many_lines
)]

use clap::Parser;
use tokio::sync::watch;

use doccheck::cli::commands::{Cli, Command, DiffFormat, ReportFormat};
use doccheck::cli::output;
use doccheck::compliance::{run_batch, BatchRequest, ComplianceClient, Session};
use doccheck::config::Config;
use doccheck::diff::{DiffAlgorithm, HighlightStyle, Highlighter};
use doccheck::ingest::ParagraphFilter;
use doccheck::models::Document;
use doccheck::operations;

fn main() {
    // stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CmdResult {
    match cli.command {
        Command::Diff {
            old,
            new,
            format,
            algorithm,
        } => cmd_diff(&old, &new, format, algorithm),
        Command::Check {
            contract,
            regulations,
            api_key,
            format,
            endpoint,
            model,
        } => cmd_check(
            &contract,
            &regulations,
            api_key,
            format,
            endpoint,
            model,
        ),
        Command::Extract { path } => cmd_extract(&path),
        Command::Formats => cmd_formats(),
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config() -> Result<Config, Box<dyn std::fmt::Display>> {
    Config::from_cwd().map_err(map_err)
}

fn read_document(config: &Config, path: &str) -> Result<Document, Box<dyn std::fmt::Display>> {
    let resolved = config.resolve(path);
    Document::from_path(&resolved).map_err(|e| map_err(format!("{path}: {e}")))
}

fn cmd_diff(
    old: &str,
    new: &str,
    format: DiffFormat,
    algorithm: Option<DiffAlgorithm>,
) -> CmdResult {
    let config = get_config()?;
    let old_doc = read_document(&config, old)?;
    let new_doc = read_document(&config, new)?;

    let highlighter = Highlighter::new(
        HighlightStyle::from(&config.settings.render),
        algorithm.unwrap_or(config.settings.diff.algorithm),
    );
    let report = operations::diff_documents(&old_doc, &new_doc, &highlighter).map_err(map_err)?;

    match format {
        DiffFormat::Json => println!("{}", output::format_json(&report)),
        DiffFormat::Html => print!("{}", output::render_diff_page(&report)),
    }
    Ok(())
}

fn cmd_check(
    contract: &str,
    regulations: &[String],
    api_key: String,
    format: ReportFormat,
    endpoint: Option<String>,
    model: Option<String>,
) -> CmdResult {
    let config = get_config()?;
    let mut settings = config.settings.compliance.clone();
    if let Some(endpoint) = endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(model) = model {
        settings.model = model;
    }

    let request = BatchRequest {
        contract: Some(read_document(&config, contract)?),
        regulations: regulations
            .iter()
            .map(|path| read_document(&config, path))
            .collect::<Result<_, _>>()?,
    };

    let mut session = Session::new(api_key);
    let client = ComplianceClient::new(&settings, session.api_key()).map_err(map_err)?;

    let rt = tokio::runtime::Runtime::new().map_err(map_err)?;
    let report = rt.block_on(async {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling analysis");
                let _ = cancel_tx.send(true);
            }
        });
        run_batch(&mut session, &client, &request, cancel_rx)
            .await
            .map_err(map_err)
    })?;

    match format {
        ReportFormat::Json => println!("{}", output::format_json(&report)),
        ReportFormat::Markdown => print!("{}", output::render_markdown_report(&report)),
    }
    Ok(())
}

fn cmd_extract(path: &str) -> CmdResult {
    let config = get_config()?;
    let document = read_document(&config, path)?;
    let result = operations::extract_document(&document, ParagraphFilter::NonBlank);
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_formats() -> CmdResult {
    let result = operations::list_formats();
    println!("{}", output::format_json(&result));
    Ok(())
}
