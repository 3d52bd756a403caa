//! pagegen CLI: product content pipeline.
//!
//! Turns one product record into FAQ, product, and comparison pages,
//! using a single text-generation call for shopper questions.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
