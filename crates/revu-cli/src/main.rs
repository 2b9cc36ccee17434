use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use revu_core::report::{self, BrandingImage, DocumentOptions, render};
use revu_core::source::{SourceContext, read_source};
use revu_core::upstream::{GeminiClient, HttpTransport};
use revu_core::{AnalysisRecord, ReviewError, normalize, review};

mod args;

fn main() {
    let args = args::Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(args.log_level()))
        .init();

    if let Err(err) = run(&args) {
        eprintln!("error: {err:#}");
        let code = err
            .downcast_ref::<ReviewError>()
            .map_or(1, ReviewError::exit_code);
        std::process::exit(code);
    }
}

fn run(args: &args::Args) -> Result<()> {
    let source = load_source(&args.source)?;
    info!(
        source = %source.label,
        size_bytes = source.size_bytes,
        sha256 = %source.short_hash(),
        "loaded source"
    );

    if source.is_blank() {
        return Err(ReviewError::EmptySource.into());
    }

    let record = match &args.raw_reply {
        Some(path) => replay(path)?,
        None => {
            let transport = HttpTransport::new(args.timeout_secs)?;
            let client = GeminiClient::new(args.gemini_config(), transport);
            review(&client, &source.text)?
        }
    };

    if let Some(path) = &args.json_out {
        let export = report::render_export(&record)?;
        std::fs::write(path, export)
            .with_context(|| format!("failed to write JSON export: {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON export");
    }

    if let Some(path) = &args.pdf_out {
        let pdf = render_pdf(&record, &source, args);
        std::fs::write(path, pdf)
            .with_context(|| format!("failed to write PDF report: {}", path.display()))?;
        info!(path = %path.display(), "wrote PDF report");
    }

    let mut output = match args.format {
        args::OutputFormat::Json => String::from_utf8(report::render_export(&record)?)?,
        args::OutputFormat::Text => render::render_text(&record),
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }

    match &args.out {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("failed to write output: {}", path.display()))?,
        None => print!("{output}"),
    }

    Ok(())
}

fn load_source(path: &Path) -> Result<SourceContext> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read source from stdin")?;
        return Ok(SourceContext::from_text("<stdin>", text));
    }
    read_source(path)
}

/// Normalize a captured model reply, skipping the network call.
fn replay(path: &Path) -> Result<AnalysisRecord> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model reply: {}", path.display()))?;
    Ok(normalize(&raw)?)
}

fn render_pdf(record: &AnalysisRecord, source: &SourceContext, args: &args::Args) -> Vec<u8> {
    let logo = args
        .logo
        .as_deref()
        .and_then(|path| match BrandingImage::load(path) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "ignoring branding image");
                None
            }
        });

    let mut options = DocumentOptions {
        subtitle: vec![
            format!("Date: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
            format!("Source: {} (sha256 {})", source.label, source.short_hash()),
        ],
        ..Default::default()
    };
    if let Some(footer) = &args.footer {
        options.footer = footer.clone();
    }

    report::render_document(record, logo.as_ref(), &options)
}
