//! `xsd-encode`: encode a JSON params tree as XML following XSD schemas.
//!
//! ```text
//! xsd-encode -s orders.xsd -s people.xsd -e PlaceOrder -p order.json
//! ```

mod args;

use std::io::Read;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use soapxml_xsd::loader::load_schema_file;
use soapxml_xsd::MemorySchemaRepository;
use tracing::info;

use crate::args::Args;

/// Initializes stderr logging; `RUST_LOG` overrides `level`.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("soapxml_xsd={},xsd_encode={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_params(args: &Args) -> anyhow::Result<Value> {
    let text = match args.params_file() {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read params file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read params from stdin")?;
            buffer
        }
    };

    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(&text).context("params are not valid JSON")
}

/// Loads the schemas and encodes the requested element.
fn run(args: &Args, params: &Value) -> anyhow::Result<String> {
    let mut repository = MemorySchemaRepository::new();
    let mut first_namespace = None;

    for path in &args.schemas {
        let schema = load_schema_file(path)
            .with_context(|| format!("failed to load schema {}", path.display()))?;
        info!(
            file = %path.display(),
            namespace = %schema.target_namespace,
            "Loaded schema"
        );
        first_namespace.get_or_insert_with(|| schema.target_namespace.clone());
        repository.insert(schema);
    }

    let namespace = args
        .namespace
        .clone()
        .or(first_namespace)
        .context("no schema was loaded")?;

    let config = args.encoder_config();
    let out = repository
        .encode_element(&namespace, &args.element, params, &config, Vec::new())
        .with_context(|| format!("failed to encode element '{}'", args.element))?;

    Ok(String::from_utf8(out)?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(errors) = args.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(2);
    }

    let params = read_params(&args)?;
    let xml = run(&args, &params)?;
    println!("{}", xml);

    Ok(())
}
