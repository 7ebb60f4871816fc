//! `generate` subcommand: render a template and write the PDF to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context as _, Result};
use clap::Args;
use documentstack_api::{Client, Config, Context, GenerateRequest, TemplateData};

use crate::output::{print_json, print_summary_table, GenerateSummary, OutputFormat};

const FALLBACK_FILENAME: &str = "document.pdf";

#[derive(Args)]
pub struct GenerateArgs {
    /// Template ID to render
    pub template_id: String,

    /// Template data as a JSON object (e.g. '{"name":"John Doe"}')
    #[arg(long, conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Read template data from a JSON file
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Output filename requested from the API, without the .pdf extension
    #[arg(long)]
    pub filename: Option<String>,

    /// Where to write the PDF (default: the filename returned by the API)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// API key (default: DOCUMENTSTACK_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// API base URL (default: DOCUMENTSTACK_BASE_URL or the production API)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default: DOCUMENTSTACK_TIMEOUT or 30)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Give up on the whole call after this many seconds
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Extra request header, repeatable (e.g. --header X-Team=billing)
    #[arg(long = "header", value_name = "NAME=VALUE")]
    pub headers: Vec<String>,

    /// Log request and response details
    #[arg(long)]
    pub debug: bool,
}

/// Run the generate command.
pub async fn run(args: &GenerateArgs, format: &OutputFormat) -> Result<()> {
    let config = build_config(args, Config::from_env()?)?;
    let client = Client::new(config)?;
    let request = build_request(args)?;

    let (mut ctx, cancel) = Context::with_cancel();
    if let Some(secs) = args.deadline {
        ctx = ctx.deadline_at(tokio::time::Instant::now() + Duration::from_secs(secs));
    }
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted, cancelling request");
            cancel.cancel();
        }
    });

    let result = client
        .generate(&ctx, &args.template_id, Some(&request))
        .await
        .with_context(|| format!("Failed to generate template {}", args.template_id))?;

    let path = args
        .out
        .clone()
        .unwrap_or_else(|| default_output_path(&result.filename));
    write_pdf(&path, &result.pdf)?;

    let summary = GenerateSummary {
        file: path.display().to_string(),
        filename: result.filename,
        bytes: result.content_length,
        generation_time_ms: result.generation_time_ms,
    };
    match format {
        OutputFormat::Table => print_summary_table(&summary),
        OutputFormat::Json => print_json(&summary),
    }
    Ok(())
}

/// Layers command-line flags over the environment config.
fn build_config(args: &GenerateArgs, mut config: Config) -> Result<Config> {
    if let Some(key) = &args.api_key {
        config.api_key = key.clone();
    }
    if config.api_key.is_empty() {
        bail!("No API key: pass --api-key or set DOCUMENTSTACK_API_KEY");
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = args.timeout {
        config.timeout_secs = secs;
    }
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        config.headers.insert(name, value);
    }
    config.debug |= args.debug;
    Ok(config)
}

fn build_request(args: &GenerateArgs) -> Result<GenerateRequest> {
    let raw = match (&args.data, &args.data_file) {
        (Some(inline), _) => Some(inline.clone()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let mut request = GenerateRequest::new();
    if let Some(raw) = raw {
        request = request.with_template_data(parse_template_data(&raw)?);
    }
    if let Some(filename) = &args.filename {
        request = request.with_filename(filename.clone());
    }
    Ok(request)
}

fn parse_template_data(raw: &str) -> Result<TemplateData> {
    match serde_json::from_str::<serde_json::Value>(raw).context("Template data is not valid JSON")? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(anyhow!(
            "Template data must be a JSON object, got {}",
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Splits `NAME=VALUE`, trimming whitespace around the name.
fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => bail!("Invalid header {:?}: expected NAME=VALUE", raw),
    }
}

/// Where to write the PDF when `--out` is not given: the last component of
/// the API's filename, in the current directory. The filename comes from a
/// response header, so directories and `..` in it are ignored.
fn default_output_path(filename: &str) -> PathBuf {
    Path::new(filename)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_FILENAME))
}

fn write_pdf(path: &Path, pdf: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, pdf).with_context(|| format!("Failed to write {}", path.display()))
}
