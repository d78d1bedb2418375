//! Command line configuration for `xsd-encode`.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `XSD_SCHEMAS` | | Comma-separated XSD files |
//! | `XSD_ELEMENT` | | Top-level element to encode |
//! | `XSD_NAMESPACE` | first schema | Target namespace declaring the element |
//! | `XSD_PARAMS` | stdin | JSON params file |
//! | `XSD_PREFIX` | ns0 | Prefix for qualified tags |
//! | `XSD_NO_NAMESPACE` | false | Leave the root unqualified |
//! | `XSD_KEEP_NAMESPACE` | false | Qualify descendants too |
//! | `XSD_MAX_DEPTH` | 64 | Maximum element nesting |
//! | `XSD_LOG_LEVEL` | warn | Log level |

use std::path::PathBuf;

use clap::Parser;
use soapxml_xsd::EncoderConfig;

/// Encodes a JSON params tree as XML following the loaded schemas.
#[derive(Debug, Clone, Parser)]
#[command(name = "xsd-encode")]
#[command(about = "Encode a JSON params tree as schema-conforming XML")]
pub struct Args {
    /// XSD files to load (repeat the flag or separate with commas).
    #[arg(
        short,
        long = "schema",
        env = "XSD_SCHEMAS",
        value_delimiter = ',',
        required = true
    )]
    pub schemas: Vec<PathBuf>,

    /// Top-level element to encode.
    #[arg(short, long, env = "XSD_ELEMENT")]
    pub element: String,

    /// Target namespace of the schema declaring the element.
    #[arg(short, long, env = "XSD_NAMESPACE")]
    pub namespace: Option<String>,

    /// JSON params file ("-" or absent reads stdin).
    #[arg(short, long, env = "XSD_PARAMS")]
    pub params: Option<PathBuf>,

    /// Prefix bound to the target namespace on qualified tags.
    #[arg(long, env = "XSD_PREFIX", default_value = "ns0")]
    pub prefix: String,

    /// Do not qualify the root element.
    #[arg(long, env = "XSD_NO_NAMESPACE")]
    pub no_namespace: bool,

    /// Qualify every element, not just the root.
    #[arg(long, env = "XSD_KEEP_NAMESPACE")]
    pub keep_namespace: bool,

    /// Maximum element nesting.
    #[arg(long, env = "XSD_MAX_DEPTH", default_value = "64")]
    pub max_depth: usize,

    /// Write an XML declaration.
    #[arg(long)]
    pub declaration: bool,

    /// Indent nested elements by this many spaces.
    #[arg(long)]
    pub indent: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "XSD_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Builds the encoder configuration from the flags.
    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            namespace_prefix: self.prefix.clone(),
            use_namespace: !self.no_namespace,
            keep_using_namespace: self.keep_namespace,
            max_depth: self.max_depth,
            write_declaration: self.declaration,
            indent: self.indent,
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = self.encoder_config().validate().err().unwrap_or_default();

        if self.element.is_empty() {
            errors.push("Element name cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The params file, unless stdin was requested.
    pub fn params_file(&self) -> Option<&std::path::Path> {
        self.params
            .as_deref()
            .filter(|p| p.as_os_str() != "-")
    }
}
