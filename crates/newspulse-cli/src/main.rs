mod render;

use clap::{Parser, Subcommand};
use newspulse_sentiment::{Method, Pipeline};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newspulse")]
#[command(about = "News sentiment analysis from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch recent news for a topic and summarize its sentiment
    Analyze {
        /// Topic to search for, e.g. a ticker or company name
        topic: String,

        /// Scoring method: vader, textblob, or finbert
        #[arg(long, default_value = "vader")]
        method: Method,

        /// Maximum articles per expanded query (overrides the configured value)
        #[arg(long)]
        limit: Option<usize>,

        /// Print the full report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Score a single piece of text
    Score {
        text: String,

        /// Scoring method: vader, textblob, or finbert
        #[arg(long, default_value = "vader")]
        method: Method,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = newspulse_core::load_pipeline_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            topic,
            method,
            limit,
            json,
        } => {
            if let Some(limit) = limit {
                config.articles_per_query = limit;
            }
            tracing::debug!(
                topic = %topic,
                method = %method,
                per_query = config.articles_per_query,
                "starting analysis"
            );
            let pipeline = Pipeline::new(config)?;
            let report = newspulse_sentiment::run_pipeline(&pipeline, &topic, method).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_report(&report)?);
            }
        }
        Commands::Score { text, method } => {
            let pipeline = Pipeline::new(config)?;
            let classification =
                newspulse_sentiment::classify(pipeline.classifier(), &text, method).await?;
            println!("{}", render::render_classification(&classification));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
