use std::path::PathBuf;

use clap::{ArgAction, Parser};
use clap_complete::Shell;
use readable_core::{
    Config, ConfidencePolicy, EngineOptions, FetchOptions, OutputOptions, Property, ReadableError, SourceOptions,
    Warning,
};

/// Proxy variables consulted, in order, when `--proxy` is absent.
const PROXY_VARIABLES: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

/// Extract the readable content of a web page
#[derive(Parser, Debug)]
#[command(name = "readable")]
#[command(version)]
#[command(about = "Extract the readable content of a web page as HTML, text or JSON", long_about = None)]
pub struct Args {
    /// File path, URL, or "-" for stdin (default: stdin when piped)
    #[arg(value_name = "SOURCE")]
    pub source: Option<String>,

    /// Base URL for resolving relative links
    #[arg(short, long, value_name = "URL")]
    pub base: Option<String>,

    /// Do not sanitize the output HTML
    #[arg(short = 'S', long)]
    pub insane: bool,

    /// Skip TLS certificate verification
    #[arg(short = 'K', long)]
    pub insecure: bool,

    /// Treat SOURCE as a file even if it looks like a URL
    #[arg(short = 'f', long)]
    pub is_file: bool,

    /// Treat SOURCE as a URL, adding https:// when it has no scheme (deprecated)
    #[arg(short = 'u', long, hide = true)]
    pub is_url: bool,

    /// Output the properties as a JSON object
    #[arg(short, long)]
    pub json: bool,

    /// Keep class attributes in the extracted content
    #[arg(short = 'C', long)]
    pub keep_classes: bool,

    /// What to do when the page does not look readable (keep, force, exit)
    #[arg(short = 'l', long, default_value = "keep", value_name = "MODE")]
    pub low_confidence: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output only these properties, comma separated or repeated
    #[arg(
        short,
        long,
        value_name = "PROPERTY",
        value_delimiter = ',',
        action = ArgAction::Append,
        value_parser = parse_property,
    )]
    pub properties: Vec<Property>,

    /// Proxy URL (default: $HTTPS_PROXY or $HTTP_PROXY)
    #[arg(short = 'x', long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Do not print warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Stylesheet path or URL to reference instead of the reader-mode one
    #[arg(short, long, value_name = "CSS")]
    pub style: Option<String>,

    /// Custom User-Agent for HTTP requests
    #[arg(short = 'A', long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    pub timeout: u64,

    /// Enable debug logging (-vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completion: Option<Shell>,
}

fn parse_property(name: &str) -> Result<Property, String> {
    name.parse().map_err(|err: ReadableError| {
        let known: Vec<&str> = Property::ALL.iter().map(|p| p.name()).collect();
        format!("{err} (expected one of: {})", known.join(", "))
    })
}

impl Args {
    /// Folds the arguments and environment into the run configuration.
    ///
    /// `env` looks up environment variables; it is a parameter so tests do
    /// not depend on the process environment.
    pub fn to_config(&self, env: impl Fn(&str) -> Option<String>) -> Result<(Config, Vec<Warning>), ReadableError> {
        let mut warnings = Vec::new();

        let parsed = ConfidencePolicy::parse(&self.low_confidence)?;
        warnings.extend(parsed.warning());

        if self.is_url {
            warnings.push(Warning::DeprecatedOption {
                option: "--is-url",
                hint: "pass the URL with its scheme instead, e.g. https://example.com",
            });
        }

        let proxy = self.proxy.clone().or_else(|| {
            PROXY_VARIABLES
                .iter()
                .filter_map(|name| env(name))
                .find(|value| !value.is_empty())
        });

        let config = Config {
            source: SourceOptions {
                token: self.source.clone(),
                is_file: self.is_file,
                is_url: self.is_url,
                base: self.base.clone(),
            },
            fetch: FetchOptions {
                proxy,
                insecure: self.insecure,
                user_agent: self.user_agent.clone(),
                timeout: self.timeout,
            },
            policy: parsed.policy,
            output: OutputOptions {
                json: self.json,
                properties: self.properties.clone(),
                style: self.style.clone(),
                sanitize: !self.insane,
            },
            engine: EngineOptions { keep_classes: self.keep_classes },
        };

        Ok((config, warnings))
    }
}
