//! Application configuration from command-line flags.
//!
//! Flags may also come from the environment (or a `.env` file loaded with
//! `dotenvy` before parsing) where noted.
//!
//! ## Required
//!
//! - `-i/--client-id` (`TTAM_CLIENT_ID`) - 23andMe client id
//! - `-c/--client-secret` (`TTAM_CLIENT_SECRET`) - prompted for if absent
//!
//! ## Optional
//!
//! - `-s/--scopes` - repeatable; default `names basic` plus the SNP panel
//! - `-r/--redirect-uri` - default `<public url>app/`
//! - `-a/--api-server` - default `api.23andme.com`
//! - `-p/--select-profile` - show the profile picker on the auth screen
//! - `-f/--ga4gh-api-server` - default BRCA Exchange
//! - `-n/--snp-data` - SNP data file, default `data/snps.data`
//! - `-d/--debug` - debug logging
//! - `--listen` - bind address (default: `127.0.0.1:5000`)
//! - `--log-format` (`LOG_FORMAT`) - `text` or `json` (default: `text`)
//! - `RUST_LOG` - overrides the log filter entirely

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use url::Url;

use crate::infrastructure::http::{HttpSettings, as_base};
use crate::infrastructure::ttam::OAuthSettings;

/// SNPs requested from 23andMe on every report.
pub const DEFAULT_SNPS: [&str; 5] = ["rs12913832", "rs3088053", "rs1000068", "rs206118", "rs206115"];

/// Scopes requested in addition to the SNP panel.
pub const BASE_SCOPES: [&str; 2] = ["names", "basic"];

pub const DEFAULT_API_SERVER: &str = "api.23andme.com";
pub const DEFAULT_GA4GH_SERVER: &str = "https://brcaexchange.org/backend/data/ga4gh/v0.6.0a1/";

/// Title and header shown on every page.
pub const PAGE_HEADER: &str = "23andMe + GA4GH";

static SNP_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(rs|i)\d+$").unwrap());

/// Command-line flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "snp-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Your 23andMe client_id [REQUIRED]
    #[arg(short = 'i', long = "client-id", env = "TTAM_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Requested scopes, e.g. `-s basic -s rs12913832`
    #[arg(short = 's', long = "scopes")]
    pub scopes: Vec<String>,

    /// The client secret (prompted for when absent)
    #[arg(
        short = 'c',
        long = "client-secret",
        env = "TTAM_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Your client's redirect_uri [default: <public url>app/]
    #[arg(short = 'r', long = "redirect-uri", visible_alias = "redirect_uri")]
    pub redirect_uri: Option<String>,

    /// 23andMe API host, almost always api.23andme.com
    #[arg(
        short = 'a',
        long = "api-server",
        visible_alias = "23andme-api-server",
        default_value = DEFAULT_API_SERVER
    )]
    pub api_server: String,

    /// Show the profile selection screen during authorization
    #[arg(short = 'p', long = "select-profile")]
    pub select_profile: bool,

    /// The GA4GH API server location
    #[arg(short = 'f', long = "ga4gh-api-server", env = "GA4GH_API_SERVER", default_value = DEFAULT_GA4GH_SERVER)]
    pub ga4gh_api_server: String,

    /// Whether or not to provide debugging output
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Tab-separated SNP data file (index, snp, chromosome, position)
    #[arg(short = 'n', long = "snp-data", default_value = "data/snps.data")]
    pub snp_data: PathBuf,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "127.0.0.1:5000")]
    pub listen: String,

    /// Externally visible base URL of this app [default: http://localhost:<port>/]
    #[arg(long = "public-url")]
    pub public_url: Option<String>,

    /// GA4GH variant set to search; empty discovers the first one
    #[arg(long = "variant-set-id", default_value = "brca-hg37")]
    pub variant_set_id: String,

    /// Default region reference name
    #[arg(long = "reference-name", default_value = "13")]
    pub reference_name: String,

    /// Default region start (exclusive)
    #[arg(long, default_value_t = 32_889_600)]
    pub start: u64,

    /// Default region end (exclusive)
    #[arg(long, default_value_t = 32_973_900)]
    pub end: u64,

    /// SNPs always requested from 23andMe
    #[arg(long = "snp", default_values = DEFAULT_SNPS)]
    pub snps: Vec<String>,

    /// Log output format: text or json
    #[arg(long = "log-format", env = "LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Retries for idempotent upstream calls
    #[arg(long = "upstream-retries", default_value_t = 2)]
    pub upstream_retries: usize,

    /// Upstream request timeout in seconds
    #[arg(long = "upstream-timeout-secs", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    /// Accept invalid TLS certificates from upstream APIs
    #[arg(short = 'k', long)]
    pub insecure: bool,
}

/// Resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    pub redirect_uri: Url,
    pub public_url: Url,
    pub api_base_url: Url,
    pub ga4gh_url: Url,
    pub select_profile: bool,
    pub debug: bool,
    pub snp_data: PathBuf,
    pub listen_addr: String,
    /// `None` means "use the first variant set of the first dataset".
    pub variant_set_id: Option<String>,
    pub reference_name: String,
    pub start: u64,
    pub end: u64,
    pub default_snps: Vec<String>,
    pub log_format: String,
    pub upstream_retries: usize,
    pub upstream_timeout_secs: u64,
    pub insecure: bool,
}

impl Config {
    /// Resolves flags into a configuration.
    ///
    /// `prompt_secret` is called with the developer dashboard URL when no
    /// client secret was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the client id is missing, a URL does not parse,
    /// or the secret prompt fails.
    pub fn from_cli(cli: Cli, prompt_secret: impl FnOnce(&str) -> Result<String>) -> Result<Self> {
        let api_base_url = api_base_url(&cli.api_server)?;
        let dashboard = dashboard_url(&api_base_url);

        let client_id = cli
            .client_id
            .filter(|id| !id.trim().is_empty())
            .with_context(|| {
                format!(
                    "missing param CLIENT_ID; please navigate to your developer dashboard [{dashboard}] to retrieve your client_id"
                )
            })?;

        let client_secret = match cli.client_secret.filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => prompt_secret(&dashboard).context("Failed to read client secret")?,
        };

        let public_url = match cli.public_url {
            Some(url) => Url::parse(&url).context("Invalid --public-url")?,
            None => default_public_url(&cli.listen)?,
        };

        let redirect_uri = match cli.redirect_uri {
            Some(uri) => Url::parse(&uri).context("Invalid --redirect-uri")?,
            None => public_url.join("app/").context("Invalid --public-url")?,
        };

        let ga4gh_url = Url::parse(&cli.ga4gh_api_server).context("Invalid --ga4gh-api-server")?;

        let scopes = if cli.scopes.is_empty() {
            BASE_SCOPES
                .iter()
                .map(|s| s.to_string())
                .chain(cli.snps.iter().cloned())
                .collect()
        } else {
            cli.scopes
        };

        let variant_set_id = Some(cli.variant_set_id.trim().to_string()).filter(|id| !id.is_empty());

        Ok(Self {
            client_id,
            client_secret,
            scopes,
            redirect_uri,
            public_url,
            api_base_url,
            ga4gh_url,
            select_profile: cli.select_profile,
            debug: cli.debug,
            snp_data: cli.snp_data,
            listen_addr: cli.listen,
            variant_set_id,
            reference_name: cli.reference_name,
            start: cli.start,
            end: cli.end,
            default_snps: cli.snps,
            log_format: cli.log_format,
            upstream_retries: cli.upstream_retries,
            upstream_timeout_secs: cli.upstream_timeout_secs,
            insecure: cli.insecure,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not an `ip:port` socket address
    /// - the client secret is empty
    /// - the default region is empty or inverted
    /// - a scope is blank or contains whitespace
    /// - a default SNP is not an `rs`/`i` identifier
    /// - an upstream URL is not HTTP(S)
    /// - retries exceed 10 or the timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "--listen must be an 'ip:port' address, got '{}'",
                self.listen_addr
            );
        }

        if self.client_secret.trim().is_empty() {
            anyhow::bail!("client secret must not be empty");
        }

        if self.reference_name.trim().is_empty() {
            anyhow::bail!("--reference-name must not be empty");
        }

        if self.start >= self.end {
            anyhow::bail!(
                "--start must be less than --end, got {} >= {}",
                self.start,
                self.end
            );
        }

        if let Some(scope) = self
            .scopes
            .iter()
            .find(|s| s.is_empty() || s.chars().any(char::is_whitespace))
        {
            anyhow::bail!("invalid scope '{}'", scope);
        }

        if let Some(snp) = self.default_snps.iter().find(|s| !SNP_ID_REGEX.is_match(s)) {
            anyhow::bail!("--snp must be an rs or i identifier, got '{}'", snp);
        }

        for (name, url) in [
            ("--api-server", &self.api_base_url),
            ("--ga4gh-api-server", &self.ga4gh_url),
            ("--redirect-uri", &self.redirect_uri),
        ] {
            if url.scheme() != "http" && url.scheme() != "https" {
                anyhow::bail!("{} must be an http(s) URL, got '{}'", name, url);
            }
        }

        if self.upstream_retries > 10 {
            anyhow::bail!(
                "--upstream-retries must be at most 10, got {}",
                self.upstream_retries
            );
        }

        if self.upstream_timeout_secs == 0 {
            anyhow::bail!("--upstream-timeout-secs must be greater than 0");
        }

        Ok(())
    }

    /// `<api>/authorize`
    pub fn authorize_url(&self) -> Result<Url> {
        Ok(self.api_base_url.join("authorize")?)
    }

    /// `<api>/token/`
    pub fn token_url(&self) -> Result<Url> {
        Ok(self.api_base_url.join("token/")?)
    }

    /// Link to the demo page.
    pub fn demo_url(&self) -> String {
        self.public_url
            .join("demo/")
            .map(String::from)
            .unwrap_or_else(|_| "/demo/".to_string())
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.upstream_timeout_secs),
            retries: self.upstream_retries,
            accept_invalid_certs: self.insecure,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the authorize or token URL cannot be built.
    pub fn oauth_settings(&self) -> Result<OAuthSettings> {
        Ok(OAuthSettings {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
            scopes: self.scopes.clone(),
            authorize_url: self.authorize_url()?,
            token_url: self.token_url()?,
            select_profile: self.select_profile,
        })
    }

    /// Whether the redirect URI is plain HTTP on a non-loopback host.
    pub fn has_insecure_redirect(&self) -> bool {
        let local = matches!(
            self.redirect_uri.host_str(),
            Some("localhost") | Some("127.0.0.1") | Some("[::1]")
        );
        self.redirect_uri.scheme() == "http" && !local
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Public URL: {}", self.public_url);
        tracing::info!("  Client id: {}", self.client_id);
        tracing::info!("  Client secret: {}", mask_secret(&self.client_secret));
        tracing::info!("  Redirect URI: {}", self.redirect_uri);
        tracing::info!("  Scopes: {}", self.scopes.join(" "));
        tracing::info!("  23andMe API: {}", self.api_base_url);
        tracing::info!("  GA4GH API: {}", self.ga4gh_url);
        tracing::info!(
            "  Variant set: {}",
            self.variant_set_id.as_deref().unwrap_or("(discover)")
        );
        tracing::info!(
            "  Default region: {}:{}-{}",
            self.reference_name,
            self.start,
            self.end
        );
        tracing::info!("  SNP data: {}", self.snp_data.display());
        tracing::info!("  Log format: {}", self.log_format);

        if self.insecure {
            tracing::warn!("  TLS certificate verification disabled for upstream APIs");
        }
        if self.has_insecure_redirect() {
            tracing::warn!("  Redirect URI is not HTTPS: {}", self.redirect_uri);
        }
    }
}

/// Turns `api.23andme.com` into `https://api.23andme.com/`; URLs with an
/// explicit scheme are kept.
fn api_base_url(server: &str) -> Result<Url> {
    let server = server.trim();
    let url = if server.starts_with("http://") || server.starts_with("https://") {
        Url::parse(server)
    } else {
        Url::parse(&format!("https://{server}"))
    };
    url.map(as_base)
        .with_context(|| format!("Invalid 23andMe API server '{server}'"))
}

fn dashboard_url(api_base_url: &Url) -> String {
    api_base_url
        .join("dev/")
        .map(String::from)
        .unwrap_or_else(|_| api_base_url.to_string())
}

fn default_public_url(listen: &str) -> Result<Url> {
    let port = listen
        .rsplit_once(':')
        .map(|(_, port)| port)
        .filter(|p| !p.is_empty())
        .with_context(|| format!("--listen must be in format 'host:port', got '{listen}'"))?;
    Url::parse(&format!("http://localhost:{port}/")).context("Invalid listen port")
}

/// Keeps the first two characters of a secret.
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(2).collect();
    format!("{visible}***")
}

/// Parses flags, resolves and validates the configuration.
///
/// # Errors
///
/// Returns an error if resolution or validation fails.
pub fn load(cli: Cli, prompt_secret: impl FnOnce(&str) -> Result<String>) -> Result<Config> {
    let config = Config::from_cli(cli, prompt_secret)?;
    config.validate()?;
    Ok(config)
}
