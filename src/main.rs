//! Impactor - Asteroid Impact Effects Estimator
//!
//! Command-line front end: reads a JSON request, runs it through the
//! service and prints the JSON response.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use impactor::config::ServiceConfig;
use impactor::service::Endpoint;
use impactor::{ImpactError, ImpactService};

const DEFAULT_CONFIG: &str = "impactor.toml";

const USAGE: &str = "Usage: impactor <calculate-impact|calculate-mitigation> [request.json]
       [--config <path>] [--population <csv>]

Reads the request from the file, or stdin when omitted, and prints the
JSON response to stdout. Set RUST_LOG to adjust log verbosity.";

struct Args {
    endpoint: String,
    request: Option<PathBuf>,
    config: Option<PathBuf>,
    population: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut population = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(args.next().ok_or("--config needs a path")?.into()),
            "--population" => population = Some(args.next().ok_or("--population needs a path")?.into()),
            flag if flag.starts_with("--") => return Err(format!("unknown option: {flag}")),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let endpoint = positional.next().ok_or("missing endpoint")?;
    if Endpoint::from_path(&endpoint).is_none() {
        return Err(format!("unknown endpoint: {endpoint}"));
    }
    let request = positional.next().map(PathBuf::from);
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument: {extra}"));
    }

    Ok(Args {
        endpoint,
        request,
        config,
        population,
    })
}

fn load_config(args: &Args) -> ServiceConfig {
    let path = args.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = ServiceConfig::load(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "failed to load config; using defaults");
        ServiceConfig::default()
    });
    if let Some(csv) = &args.population {
        config.population_csv = Some(csv.clone());
    }
    config
}

fn read_request(path: Option<&PathBuf>) -> Result<String, ImpactError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(args.first().map(|s| s.as_str()), Some("--help") | Some("-h") | None) {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let args = match parse_args(args.into_iter()) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let service = match ImpactService::from_config(load_config(&args)) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    let body = match read_request(args.request.as_ref()) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Failed to read request: {e}");
            return ExitCode::FAILURE;
        }
    };

    let response = service.handle_json(&args.endpoint, &body);
    match serde_json::to_string_pretty(&response.body) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to encode response: {e}");
            return ExitCode::FAILURE;
        }
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
