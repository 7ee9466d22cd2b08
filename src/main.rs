use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio::pipeline::{self, PipelineConfig, DEFAULT_CHUNK_MODEL, DEFAULT_FINAL_MODEL, DEFAULT_OUTPUT_ROOT};
use folio::{SummaryClient, DEFAULT_WORD_LIMIT};

#[derive(Parser)]
#[command(name = "folio")]
#[command(
    author,
    version,
    about = "Summarize book-length documents through word-bounded chunking"
)]
struct Cli {
    /// OpenAI API key; falls back to the OPENAI_API_KEY environment variable
    #[arg(long, env = "OPENAI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: extract, chunk, summarize, synthesize
    Process {
        /// Document to process (txt, pdf, or epub)
        input: PathBuf,

        /// Root directory for the output tree
        #[arg(short, long, default_value = DEFAULT_OUTPUT_ROOT)]
        output: PathBuf,

        /// Maximum words per chunk
        #[arg(long, default_value_t = DEFAULT_WORD_LIMIT, value_parser = parse_word_limit)]
        word_limit: usize,

        /// Model for per-chunk summaries
        #[arg(long, default_value = DEFAULT_CHUNK_MODEL)]
        chunk_model: String,

        /// Model for the final synthesis
        #[arg(long, default_value = DEFAULT_FINAL_MODEL)]
        final_model: String,
    },

    /// Extract and clean the document text without summarizing
    Extract {
        /// Document to extract (txt, pdf, or epub)
        input: PathBuf,

        /// Root directory for the output tree
        #[arg(short, long, default_value = DEFAULT_OUTPUT_ROOT)]
        output: PathBuf,
    },
}

fn parse_word_limit(raw: &str) -> Result<usize, String> {
    let limit: usize = raw.parse().map_err(|_| format!("not a number: {raw}"))?;
    if limit < 1 {
        return Err("word limit must be at least 1".to_string());
    }
    Ok(limit)
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_client(api_key: Option<String>, api_base: Option<&str>) -> Option<SummaryClient> {
    let key = api_key?;
    Some(match api_base {
        Some(base) => SummaryClient::with_base_url(key, base),
        None => SummaryClient::new(key),
    })
}

fn main() -> Result<()> {
    // .env values feed the `env`-backed arguments, so load before parsing
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Process {
            input,
            output,
            word_limit,
            chunk_model,
            final_model,
        } => {
            let client = build_client(cli.api_key, cli.api_base.as_deref());
            if client.is_none() {
                warn!("No API key provided; summarization stages will be skipped");
            }

            let config = PipelineConfig {
                output_root: output,
                word_limit,
                chunk_model,
                final_model,
                ..PipelineConfig::default()
            };

            let report = pipeline::run(&input, client.as_ref(), &config)?;

            println!("Chunks written: {}", report.chunk_paths.len());
            println!("Summaries written: {}", report.summary_paths.len());
            if let Some(path) = &report.final_summary_path {
                println!("Final summary: {}", path.display());
            }
        }
        Commands::Extract { input, output } => match pipeline::extract_to_file(&input, &output)? {
            Some(path) => println!("Extracted text: {}", path.display()),
            None => println!("No text extracted from {}", input.display()),
        },
    }

    Ok(())
}
