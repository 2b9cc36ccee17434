use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use revu_core::upstream::gemini::{
    API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeminiConfig,
};

#[derive(Debug, Parser)]
#[command(
    name = "revu",
    version,
    about = "AI code review with structured JSON and PDF reports"
)]
pub struct Args {
    /// Source file to review, or `-` for stdin
    pub source: PathBuf,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Also write the canonical JSON export here
    #[arg(long)]
    pub json_out: Option<PathBuf>,

    /// Also write the paginated PDF report here
    #[arg(long)]
    pub pdf_out: Option<PathBuf>,

    /// JPEG image for the report heading
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Footer text stamped on every report page
    #[arg(long)]
    pub footer: Option<String>,

    /// Model API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the model API
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Normalize a saved model reply instead of calling the model
    #[arg(long)]
    pub raw_reply: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
