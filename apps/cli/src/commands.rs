//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use pagegen_core::input::load_raw_product;
use pagegen_core::pipeline::{PipelineConfig, PipelineOutcome, ProgressReporter, run_pipeline};
use pagegen_generation::{CannedGenerator, OpenRouterClient, OpenRouterOptions};
use pagegen_shared::{
    AppConfig, QuestionCategory, init_config, load_config, resolve_api_key, validate_base_url,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// pagegen: generate product content pages from structured product data.
#[derive(Parser)]
#[command(
    name = "pagegen",
    version,
    about = "Generate FAQ, product, and comparison pages from structured product data.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the full pipeline once.
    Run {
        /// Raw product JSON file (defaults to the built-in sample product).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for the rendered pages (defaults to config `output_dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Model ID for question generation (defaults to config `default_model`).
        #[arg(short, long)]
        model: Option<String>,

        /// Use the contents of this file as the service reply instead of calling the API.
        #[arg(long, value_name = "FILE")]
        canned_response: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "pagegen=info",
        1 => "pagegen=debug",
        _ => "pagegen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            input,
            out,
            model,
            canned_response,
        } => {
            cmd_run(
                input.as_deref(),
                out,
                model,
                canned_response.as_deref(),
            )
            .await
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_run(
    input: Option<&Path>,
    out: Option<PathBuf>,
    model: Option<String>,
    canned_response: Option<&Path>,
) -> Result<()> {
    let config = load_config()?;
    let raw = load_raw_product(input)?;

    let output_dir = out.unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir));
    let model = model.unwrap_or_else(|| config.openrouter.default_model.clone());

    let mut pipeline_config = PipelineConfig::new(output_dir, model);
    pipeline_config.currency_symbol = config.pricing.currency_symbol.clone();

    info!(
        out = %pipeline_config.output_dir.display(),
        model = %pipeline_config.model,
        "running pipeline"
    );

    let reporter = CliProgress::new();

    let outcome = match canned_response {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| eyre!("cannot read canned response '{}': {e}", path.display()))?;
            let generator = CannedGenerator::new(text);
            run_pipeline(&pipeline_config, raw, &generator, &reporter).await
        }
        None => {
            let client = openrouter_client(&config)?;
            run_pipeline(&pipeline_config, raw, &client, &reporter).await
        }
    };

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            reporter.spinner.finish_and_clear();
            return Err(e.into());
        }
    };

    print_summary(&outcome);
    Ok(())
}

/// Build the OpenRouter client from config and the API key env var.
fn openrouter_client(config: &AppConfig) -> Result<OpenRouterClient> {
    let api_key = resolve_api_key(config)?;
    let base_url = validate_base_url(config)?;

    let client = OpenRouterClient::new(&OpenRouterOptions {
        base_url,
        api_key,
        timeout_secs: config.openrouter.timeout_secs,
    })?;

    Ok(client)
}

fn print_summary(outcome: &PipelineOutcome) {
    let state = &outcome.state;

    println!();
    println!("  Pages generated!");
    if let Some(product) = &state.product {
        println!("  Product:   {}", product.name);
    }
    if let Some(questions) = &state.questions {
        let counts = QuestionCategory::ALL
            .iter()
            .map(|c| format!("{c} {}", questions.questions(*c).len()))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  Questions: {} ({counts})", questions.total_questions());
    }
    for page in &state.written {
        println!(
            "  Wrote:     {} ({} bytes, sha256 {})",
            page.path.display(),
            page.size_bytes,
            &page.sha256[..12]
        );
    }
    println!("  Time:      {:.1}s", outcome.elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _outcome: &PipelineOutcome) {
        self.spinner.finish_and_clear();
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
