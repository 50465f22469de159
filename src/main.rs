use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use prober_config::{MetadataSource, ProberConfig};
use prober_engine::Prober;
use prober_http::{HttpFetcher, RestTester};
use prober_invoker::HttpInvokerFactory;
use prober_resolver::{FsMetadataResolver, HttpMetadataResolver, MetadataResolver};
use prober_service::{EndpointResult, Value};

/// Prober - tests remote service endpoints and caches what works
#[derive(Parser)]
#[command(name = "prober")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a JSON config file (default: ~/.config/prober/config.json if present)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Test every operation of one or more endpoints with generated input
  Endpoint {
    /// Endpoint URLs
    #[arg(required = true)]
    endpoints: Vec<String>,
  },

  /// Test a single operation with the given input
  Operation {
    /// Endpoint URL
    endpoint: String,

    /// Operation name
    operation: String,

    /// Arguments as a JSON array of scalars, e.g. '[1, "two", true]'
    #[arg(long, default_value = "[]")]
    input: String,
  },

  /// Fetch a REST operation and print its body
  Rest {
    /// Base URL of the REST service
    base_url: String,

    /// Operation name, appended to the base URL
    operation: String,

    /// Query parameter as name=value (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let config = load_config(cli.config)?;

  match cli.command {
    Some(Commands::Endpoint { endpoints }) => {
      test_endpoints(config, endpoints)?;
    }
    Some(Commands::Operation {
      endpoint,
      operation,
      input,
    }) => {
      test_operation(config, endpoint, operation, input)?;
    }
    Some(Commands::Rest {
      base_url,
      operation,
      params,
    }) => {
      test_rest(config, base_url, operation, params)?;
    }
    None => {
      println!("prober - use --help to see available commands");
    }
  }

  Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<ProberConfig> {
  let path = match path {
    Some(path) => path,
    None => match dirs::config_dir().map(|dir| dir.join("prober").join("config.json")) {
      Some(default) if default.exists() => default,
      _ => return Ok(ProberConfig::default()),
    },
  };

  let config = ProberConfig::from_file(&path)
    .with_context(|| format!("failed to load config file: {}", path.display()))?;
  eprintln!("Loaded config: {}", path.display());
  Ok(config)
}

fn http_client(config: &ProberConfig) -> Result<reqwest::Client> {
  reqwest::Client::builder()
    .timeout(Duration::from_millis(config.http.timeout_ms))
    .user_agent(config.http.user_agent.clone())
    .build()
    .context("failed to build HTTP client")
}

fn build_prober(
  config: &ProberConfig,
) -> Result<Prober<Box<dyn MetadataResolver>, HttpInvokerFactory>> {
  let client = http_client(config)?;

  let resolver: Box<dyn MetadataResolver> = match &config.metadata {
    MetadataSource::Http => Box::new(HttpMetadataResolver::new(client.clone())),
    MetadataSource::Fs { dir } => {
      eprintln!("Reading descriptions from: {}", dir.display());
      Box::new(FsMetadataResolver::new(dir))
    }
  };

  Ok(Prober::new(resolver, HttpInvokerFactory::new(client)).with_config(config.engine.clone()))
}

fn test_endpoints(config: ProberConfig, endpoints: Vec<String>) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { test_endpoints_async(config, endpoints).await })
}

async fn test_endpoints_async(config: ProberConfig, endpoints: Vec<String>) -> Result<()> {
  let prober = build_prober(&config)?;

  eprintln!("Testing {} endpoint(s)", endpoints.len());
  // Sorted for stable output
  let results: BTreeMap<_, _> = prober.test_endpoints(&endpoints).await.into_iter().collect();

  for line in summary_lines(&results) {
    eprintln!("{}", line);
  }

  println!("{}", serde_json::to_string_pretty(&results)?);

  Ok(())
}

/// One progress line per endpoint, in endpoint id order.
fn summary_lines(results: &BTreeMap<String, EndpointResult>) -> Vec<String> {
  results
    .values()
    .map(|result| {
      let valid = result.operations.iter().filter(|op| op.is_valid).count();
      format!(
        "{}: {} ({}/{} operations valid, {} error(s))",
        result.endpoint_id,
        if result.succeeded { "ok" } else { "failed" },
        valid,
        result.operations.len(),
        result.errors.len()
      )
    })
    .collect()
}

fn test_operation(
  config: ProberConfig,
  endpoint: String,
  operation: String,
  input: String,
) -> Result<()> {
  let input = parse_input(&input)?;
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { test_operation_async(config, endpoint, operation, input).await })
}

async fn test_operation_async(
  config: ProberConfig,
  endpoint: String,
  operation: String,
  input: Vec<Value>,
) -> Result<()> {
  let prober = build_prober(&config)?;

  eprintln!("Testing {} on {}", operation, endpoint);
  let result = prober
    .test_operation_given_input(&endpoint, &operation, input)
    .await;

  match result.operation(&operation) {
    Some(record) if record.is_valid => eprintln!("Operation succeeded"),
    _ => eprintln!("Operation failed ({} error(s))", result.errors.len()),
  }

  println!("{}", serde_json::to_string_pretty(&result)?);

  Ok(())
}

fn test_rest(
  config: ProberConfig,
  base_url: String,
  operation: String,
  params: Vec<(String, String)>,
) -> Result<()> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { test_rest_async(config, base_url, operation, params).await })
}

async fn test_rest_async(
  config: ProberConfig,
  base_url: String,
  operation: String,
  params: Vec<(String, String)>,
) -> Result<()> {
  let tester = RestTester::new(HttpFetcher::new(http_client(&config)?));
  let (names, values): (Vec<String>, Vec<String>) = params.into_iter().unzip();

  let content = tester
    .test_rest_operation(&base_url, &operation, &names, &values)
    .await
    .with_context(|| format!("REST operation '{}' failed", operation))?;

  eprintln!("Fetched {} bytes", content.len());
  println!("{}", content);

  Ok(())
}

/// Parse `--input` into positional arguments.
fn parse_input(input: &str) -> Result<Vec<Value>> {
  let json: serde_json::Value =
    serde_json::from_str(input).context("failed to parse --input as JSON")?;

  let Some(items) = json.as_array() else {
    bail!("--input must be a JSON array, got: {}", json);
  };

  items
    .iter()
    .enumerate()
    .map(|(i, item)| Value::from_json(item).with_context(|| format!("invalid argument {}", i)))
    .collect()
}

fn parse_param(s: &str) -> Result<(String, String), String> {
  match s.split_once('=') {
    Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
    _ => Err(format!("expected name=value, got '{}'", s)),
  }
}
