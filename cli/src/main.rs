use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui_schema_config::{
    DocumentFormat, FeatureConfig, FileReport, ValidationSummary, collect_document_paths,
    parse_document, parse_feature_override, validate_files,
};
use ui_schema_core::{ElementType, FeatureSet, catalog};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
    Yaml,
}

/// Encoding of a document read from stdin.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliDocumentFormat {
    Json,
    Yaml,
}

impl From<CliDocumentFormat> for DocumentFormat {
    fn from(fmt: CliDocumentFormat) -> Self {
        match fmt {
            CliDocumentFormat::Json => Self::Json,
            CliDocumentFormat::Yaml => Self::Yaml,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "ui-schema")]
#[command(about = "Validate integration UI component schemas")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate schema documents from files, directories or stdin.
    Validate(ValidateArgs),
    /// List the element types accepted under the given feature flags.
    Types(TypesArgs),
}

#[derive(Debug, Args)]
struct FeatureArgs {
    /// Enable a feature flag (`name`, `name=true` or `name=false`). Repeatable.
    #[arg(long = "feature", value_name = "FLAG")]
    features: Vec<String>,
    /// YAML or JSON file holding feature flags.
    #[arg(long)]
    features_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Document files and/or directories containing documents.
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    inputs: Vec<PathBuf>,
    /// Read a single document from stdin.
    #[arg(long)]
    stdin: bool,
    /// Encoding of the stdin document.
    #[arg(long, default_value = "json")]
    stdin_format: CliDocumentFormat,
    #[command(flatten)]
    features: FeatureArgs,
    /// Output format for validation results.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct TypesArgs {
    #[command(flatten)]
    features: FeatureArgs,
    /// Include gated types that are currently disabled.
    #[arg(long)]
    all: bool,
    /// Output format for the type listing.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Types(args) => run_types(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "ui_schema={level},ui_schema_config={level}"
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let features = resolve_features(&args.features)?;

    let summary = if args.stdin {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|err| format!("Failed to read stdin: {err}"))?;
        let document =
            parse_document(&raw, args.stdin_format.into()).map_err(|e| e.to_string())?;
        ValidationSummary {
            reports: vec![FileReport::from_document("<stdin>", &document, &features)],
        }
    } else {
        let paths = collect_document_paths(&args.inputs).map_err(|e| e.to_string())?;
        info!(documents = paths.len(), "validating schema documents");
        validate_files(&paths, &features)
    };

    print!("{}", format_summary(&summary, args.format)?);

    if summary.all_accepted() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} document(s) rejected",
            summary.rejected(),
            summary.reports.len()
        ))
    }
}

#[derive(Debug, Serialize)]
struct TypeListing {
    #[serde(rename = "type")]
    element_type: ElementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    feature: Option<&'static str>,
    enabled: bool,
    multiple: bool,
}

fn run_types(args: TypesArgs) -> Result<(), String> {
    let features = resolve_features(&args.features)?;

    let listings: Vec<TypeListing> = catalog()
        .entries()
        .map(|entry| TypeListing {
            element_type: entry.element_type,
            feature: entry.feature,
            enabled: entry.is_enabled(&features),
            multiple: entry.multiple,
        })
        .filter(|listing| args.all || listing.enabled)
        .collect();

    let output = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&listings)
            .map(|json| format!("{json}\n"))
            .map_err(|e| format!("JSON serialization failed: {e}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&listings)
            .map_err(|e| format!("YAML serialization failed: {e}"))?,
        CliOutputFormat::Text => {
            let mut out = String::new();
            for listing in &listings {
                out.push_str(listing.element_type.as_str());
                if let Some(flag) = listing.feature {
                    let state = if listing.enabled { "enabled" } else { "disabled" };
                    out.push_str(&format!(" (feature {flag}, {state})"));
                }
                out.push('\n');
            }
            out
        }
    };

    print!("{output}");
    Ok(())
}

/// Builds the effective feature set: file flags first, then `--feature`
/// overrides.
fn resolve_features(args: &FeatureArgs) -> Result<FeatureSet, String> {
    let config = match &args.features_file {
        Some(path) => FeatureConfig::load(path)
            .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?,
        None => FeatureConfig::default(),
    };

    let overrides = args
        .features
        .iter()
        .map(|raw| parse_feature_override(raw))
        .collect::<Result<FeatureSet, _>>()
        .map_err(|e| e.to_string())?;

    let features = config.with_overrides(&overrides).features;
    debug!(
        active = ?features.active().collect::<Vec<_>>(),
        "resolved feature flags"
    );
    Ok(features)
}

fn format_summary(summary: &ValidationSummary, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(summary)
            .map(|json| format!("{json}\n"))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(summary).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        CliOutputFormat::Text => {
            let mut out = String::new();
            for report in &summary.reports {
                out.push_str(&format_report_line(report));
                out.push('\n');
            }
            out.push_str(&format!(
                "Validated {} document(s): {} accepted, {} rejected.\n",
                summary.reports.len(),
                summary.accepted(),
                summary.rejected()
            ));
            Ok(out)
        }
    }
}

fn format_report_line(report: &FileReport) -> String {
    let path = report.path.display();
    match (&report.error, report.kind) {
        (Some(error), Some(kind)) => format!("FAILED {path}: {error} [{kind}]"),
        (Some(error), None) => format!("FAILED {path}: {error}"),
        (None, _) => format!("ok     {path}"),
    }
}
