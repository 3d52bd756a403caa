//! End-to-end pipeline: raw product → parse → questions → FAQ → product page → comparison.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use pagegen_generation::TextGenerator;
use pagegen_shared::{PageGenError, PricingConfig, Product, QuestionSet, RawProduct, Result};

use crate::comparison::{self, RADIANT_FIX_C_SERUM};
use crate::writer::WrittenPage;
use crate::{faq, parser, product_page, questions};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Values accumulated as the stages run. Each stage takes the state by value
/// and hands it back with its own output added.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    pub raw_product_data: RawProduct,
    /// Set by the parser.
    pub product: Option<Product>,
    /// Set by the question generator.
    pub questions: Option<QuestionSet>,
    /// Pages written so far, in stage order.
    pub written: Vec<WrittenPage>,
}

impl PipelineState {
    pub fn new(raw_product_data: RawProduct) -> Self {
        Self {
            raw_product_data,
            product: None,
            questions: None,
            written: Vec::new(),
        }
    }

    /// The parsed product; an error if the parser has not run.
    pub fn product(&self) -> Result<&Product> {
        self.product
            .as_ref()
            .ok_or_else(|| PageGenError::validation("product has not been parsed yet"))
    }
}

// ---------------------------------------------------------------------------
// Config / outcome
// ---------------------------------------------------------------------------

/// Configuration for [`run_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory the three pages are written to.
    pub output_dir: PathBuf,
    /// Model ID passed to the text-generation service.
    pub model: String,
    /// Prefix for formatted prices.
    pub currency_symbol: String,
}

impl PipelineConfig {
    pub fn new(output_dir: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            model: model.into(),
            currency_symbol: PricingConfig::default().currency_symbol,
        }
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub state: PipelineState,
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new stage.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, outcome: &PipelineOutcome);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _outcome: &PipelineOutcome) {}
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Run every stage once, in order. The first error aborts the run; pages
/// already written stay on disk.
#[instrument(skip_all, fields(model = %config.model, out = %config.output_dir.display()))]
pub async fn run_pipeline<G: TextGenerator>(
    config: &PipelineConfig,
    raw: RawProduct,
    generator: &G,
    progress: &dyn ProgressReporter,
) -> Result<PipelineOutcome> {
    let start = Instant::now();
    let state = PipelineState::new(raw);

    progress.phase("Parsing product data");
    let state = parser::run(state)?;

    progress.phase("Generating questions");
    let state = questions::run(state, generator, &config.model).await?;

    progress.phase("Rendering FAQ page");
    let state = faq::run(state, &config.output_dir)?;

    progress.phase("Rendering product page");
    let state = product_page::run(state, &config.output_dir, &config.currency_symbol)?;

    progress.phase("Rendering comparison page");
    let state = comparison::run(state, &config.output_dir, &RADIANT_FIX_C_SERUM)?;

    let outcome = PipelineOutcome {
        state,
        elapsed: start.elapsed(),
    };

    progress.done(&outcome);

    info!(
        pages = outcome.state.written.len(),
        elapsed_ms = outcome.elapsed.as_millis(),
        "pipeline complete"
    );

    Ok(outcome)
}
