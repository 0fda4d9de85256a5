//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::books::CatalogRules;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay between requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of records to output
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Filter: drop catalog records missing authors, year or price
    #[serde(default = "default_require_complete")]
    pub require_complete: bool,

    /// Filter: minimum price
    #[serde(default)]
    pub min_price: Option<f64>,

    /// Filter: maximum price
    #[serde(default)]
    pub max_price: Option<f64>,

    /// Filter: keywords that must appear in title
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Filter: keywords that must NOT appear in title
    #[serde(default)]
    pub exclude_keywords: Vec<String>,

    /// Catalog pages used when none are given on the command line
    #[serde(default = "default_catalog_urls")]
    pub catalog_urls: Vec<String>,

    /// Product pages used when none are given on the command line
    #[serde(default = "default_product_urls")]
    pub product_urls: Vec<String>,

    /// Catalog scanner denylist and lookahead windows
    #[serde(default)]
    pub rules: CatalogRules,
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_delay_jitter_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_results() -> usize {
    100
}

fn default_require_complete() -> bool {
    true
}

/// Data engineering listings crawled when nothing else is configured.
const DEFAULT_CATALOG_URLS: &[&str] = &[
    "https://www.manning.com/catalog/software-development/cloud/data-engineering",
    "https://www.manning.com/catalog/software-development/cloud/data-engineering/cloud-data-platforms",
    "https://www.manning.com/catalog/software-development/cloud/data-engineering/big-data-processing",
    "https://www.manning.com/catalog/software-development/cloud/data-engineering/cloud-data-engineering",
    "https://www.manning.com/catalog/software-development/databases/database-platforms/azure-data-engineering",
    "https://www.manning.com/catalog/data-science/data-engineering/data-management-and-organization",
];

const DEFAULT_PRODUCT_URLS: &[&str] = &[
    "https://www.packtpub.com/en-us/product/data-engineering-with-python-9781839214189?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-with-aws-9781800560413?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-with-dbt-9781803246284?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-best-practices-9781803244983?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-with-databricks-cookbook-9781837633357?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-with-google-cloud-platform-9781800561328?type=print",
    "https://www.packtpub.com/en-us/product/building-etl-pipelines-with-python-9781804615256?type=print",
    "https://www.packtpub.com/en-us/product/data-observability-for-data-engineering-9781804616024?type=print",
    "https://www.packtpub.com/en-us/product/simplifying-data-engineering-and-analytics-with-delta-9781801814867?type=print",
    "https://www.packtpub.com/en-us/product/modern-data-architectures-with-python-9781801070492?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-with-apache-spark-delta-lake-and-lakehouse-9781801077743?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-with-alteryx-9781803236483?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-with-scala-and-spark-9781804612583?type=print",
    "https://www.packtpub.com/en-us/product/big-data-on-kubernetes-9781835462140?type=print",
    "https://www.packtpub.com/en-us/product/data-engineering-with-aws-cookbook-9781805126850",
];

fn default_catalog_urls() -> Vec<String> {
    DEFAULT_CATALOG_URLS.iter().map(|u| u.to_string()).collect()
}

fn default_product_urls() -> Vec<String> {
    DEFAULT_PRODUCT_URLS.iter().map(|u| u.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            format: OutputFormat::Table,
            require_complete: default_require_complete(),
            min_price: None,
            max_price: None,
            keywords: Vec::new(),
            exclude_keywords: Vec::new(),
            catalog_urls: default_catalog_urls(),
            product_urls: default_product_urls(),
            rules: CatalogRules::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.rules = config.rules.normalized();

        Ok(config)
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("books.toml");
        if local_config.exists() {
            debug!("Found books.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("book-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("BOOKS_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("BOOKS_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(timeout) = std::env::var("BOOKS_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Ndjson,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "ndjson" | "jsonl" => Ok(OutputFormat::Ndjson),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, ndjson, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Ndjson => write!(f, "ndjson"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.delay_jitter_ms, 500);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_results, 100);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.require_complete);
        assert!(config.proxy.is_none());
        assert!(config.min_price.is_none());
        assert!(config.max_price.is_none());
        assert!(config.keywords.is_empty());
        assert_eq!(config.catalog_urls.len(), 6);
        assert_eq!(config.product_urls.len(), 15);
        assert!(config.catalog_urls.iter().all(|u| u.starts_with("https://www.manning.com/catalog/")));
        assert!(config.product_urls.iter().all(|u| u.starts_with("https://www.packtpub.com/en-us/product/")));
        assert_eq!(config.rules.year_window, 7);
        assert!(config.rules.is_noise("Catalog"));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("ndjson".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
        assert!(err.contains("table, json, ndjson, csv"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Ndjson.to_string(), "ndjson");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Ndjson).unwrap();
        assert_eq!(json, "\"ndjson\"");

        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            proxy = "socks5://localhost:1080"
            delay_ms = 5000
            delay_jitter_ms = 2000
            timeout_secs = 10
            max_results = 15
            format = "csv"
            require_complete = false
            min_price = 10.0
            max_price = 60.0
            keywords = ["data"]
            exclude_keywords = ["cookbook"]
            catalog_urls = ["https://www.manning.com/catalog/data-engineering"]
            product_urls = ["https://www.packtpub.com/en-us/product/big-data-on-kubernetes"]

            [rules]
            noise = ["Deals", "Gift Cards"]
            price_window = 4
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
        assert_eq!(config.delay_ms, 5000);
        assert_eq!(config.delay_jitter_ms, 2000);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_results, 15);
        assert_eq!(config.format, OutputFormat::Csv);
        assert!(!config.require_complete);
        assert_eq!(config.min_price, Some(10.0));
        assert_eq!(config.max_price, Some(60.0));
        assert_eq!(config.keywords, vec!["data"]);
        assert_eq!(config.exclude_keywords, vec!["cookbook"]);
        assert_eq!(config.catalog_urls.len(), 1);
        assert_eq!(config.product_urls.len(), 1);
        assert_eq!(config.rules.price_window, 4);
        assert_eq!(config.rules.year_window, 7);
        assert!(!config.rules.is_noise("Catalog"));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            delay_ms = 4000

            [rules]
            noise = ["WEEKLY DEALS"]
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.delay_ms, 4000);
        // Omitted URL lists keep the built-in sources
        assert_eq!(config.catalog_urls, Config::default().catalog_urls);
        assert_eq!(config.product_urls.len(), 15);
        // Denylist entries are lowercased on load
        assert!(config.rules.noise.contains("weekly deals"));
        assert!(config.rules.is_noise("Weekly Deals"));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_results = 30").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.max_results, 30);
    }

    #[test]
    fn test_config_with_env() {
        let orig_proxy = std::env::var("BOOKS_PROXY").ok();
        let orig_delay = std::env::var("BOOKS_DELAY").ok();
        let orig_timeout = std::env::var("BOOKS_TIMEOUT").ok();

        std::env::set_var("BOOKS_PROXY", "http://proxy:8080");
        std::env::set_var("BOOKS_DELAY", "not_a_number");
        std::env::set_var("BOOKS_TIMEOUT", "5");

        let config = Config::new().with_env();
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        // Invalid values are ignored
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.timeout_secs, 5);

        match orig_proxy {
            Some(v) => std::env::set_var("BOOKS_PROXY", v),
            None => std::env::remove_var("BOOKS_PROXY"),
        }
        match orig_delay {
            Some(v) => std::env::set_var("BOOKS_DELAY", v),
            None => std::env::remove_var("BOOKS_DELAY"),
        }
        match orig_timeout {
            Some(v) => std::env::set_var("BOOKS_TIMEOUT", v),
            None => std::env::remove_var("BOOKS_TIMEOUT"),
        }
    }
}
