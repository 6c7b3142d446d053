// src/config.rs
//! Client configuration, fixed for the lifetime of a client.

use crate::constants::{
    API_BASE_URL, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT,
};
use crate::error::NotionError;
use crate::types::{ApiKey, ValidationError};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// How much of each request/response is written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpLoggingLevel {
    #[default]
    None,
    /// Method, URL, status and timing.
    Info,
    /// `Info` plus headers; `Authorization` is redacted.
    Headers,
    /// `Info` plus bodies.
    Body,
    All,
}

impl HttpLoggingLevel {
    pub fn includes_headers(&self) -> bool {
        matches!(self, Self::Headers | Self::All)
    }

    pub fn includes_body(&self) -> bool {
        matches!(self, Self::Body | Self::All)
    }
}

impl FromStr for HttpLoggingLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "info" => Ok(Self::Info),
            "headers" => Ok(Self::Headers),
            "body" => Ok(Self::Body),
            "all" => Ok(Self::All),
            _ => Err(ValidationError::InvalidLoggingLevel(s.to_string())),
        }
    }
}

impl fmt::Display for HttpLoggingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Info => "info",
            Self::Headers => "headers",
            Self::Body => "body",
            Self::All => "all",
        };
        f.write_str(name)
    }
}

/// An outbound HTTP proxy every request is routed through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpProxy {
    host: String,
    port: u16,
}

impl HttpProxy {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ValidationError> {
        let host = host.into();
        let invalid = |reason: &str| ValidationError::InvalidProxy {
            value: format!("{}:{}", host, port),
            reason: reason.to_string(),
        };

        if host.trim().is_empty() {
            return Err(invalid("host cannot be empty"));
        }
        if port == 0 {
            return Err(invalid("port must be non-zero"));
        }
        Url::parse(&format!("http://{}:{}", host, port))
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self { host, port })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The proxy as an `http://host:port` URL.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl FromStr for HttpProxy {
    type Err = ValidationError;

    /// Parses `host:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidProxy {
            value: s.to_string(),
            reason: reason.to_string(),
        };
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected host:port"))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| invalid("port must be a number between 1 and 65535"))?;
        Self::new(host, port)
    }
}

impl fmt::Display for HttpProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// HTTP-level behavior of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfiguration {
    pub logging_level: HttpLoggingLevel,
    pub http_proxy: Option<HttpProxy>,
    /// Upper bound for a whole call, transport included.
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpConfiguration {
    fn default() -> Self {
        Self {
            logging_level: HttpLoggingLevel::None,
            http_proxy: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Everything a [`crate::NotionClient`] is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    api_key: ApiKey,
    user_agent: String,
    base_url: Url,
    http: HttpConfiguration,
}

impl ClientConfiguration {
    /// A configuration with defaults for everything but the token.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: default_base_url(),
            http: HttpConfiguration::default(),
        }
    }

    pub fn builder(api_key: ApiKey) -> ClientConfigurationBuilder {
        ClientConfigurationBuilder {
            config: Self::new(api_key),
            base_url: None,
        }
    }

    /// Reads the token from `NOTION_API_KEY`.
    pub fn from_env() -> Result<ClientConfigurationBuilder, NotionError> {
        let raw = std::env::var(API_KEY_ENV).map_err(|_| {
            NotionError::MissingConfiguration(format!(
                "{} environment variable not set",
                API_KEY_ENV
            ))
        })?;
        Ok(Self::builder(ApiKey::new(raw)?))
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn http(&self) -> &HttpConfiguration {
        &self.http
    }
}

pub struct ClientConfigurationBuilder {
    config: ClientConfiguration,
    base_url: Option<String>,
}

impl ClientConfigurationBuilder {
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Overrides the API root, e.g. to point at a local mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn logging_level(mut self, level: HttpLoggingLevel) -> Self {
        self.config.http.logging_level = level;
        self
    }

    pub fn http_proxy(mut self, proxy: HttpProxy) -> Self {
        self.config.http.http_proxy = Some(proxy);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.http.request_timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.http.connect_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ClientConfiguration, ValidationError> {
        let mut config = self.config;
        if config.user_agent.trim().is_empty() {
            return Err(ValidationError::EmptyField("user_agent"));
        }
        if let Some(raw) = self.base_url {
            config.base_url = parse_base_url(&raw)?;
        }
        Ok(config)
    }
}

fn default_base_url() -> Url {
    Url::parse(API_BASE_URL).unwrap_or_else(|e| unreachable!("API_BASE_URL is valid: {e}"))
}

/// Parses an API root, making sure it ends with `/` so relative endpoint
/// paths join beneath it instead of replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ApiKey {
        ApiKey::new("secret_abcdefghijklmnopqrstuvwxyz").unwrap()
    }

    #[test]
    fn defaults() {
        let config = ClientConfiguration::new(key());
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.base_url().as_str(), "https://api.notion.com/v1/");
        assert_eq!(config.http().logging_level, HttpLoggingLevel::None);
        assert_eq!(config.http().request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert!(config.http().http_proxy.is_none());
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let config = ClientConfiguration::builder(key())
            .base_url("http://localhost:8080/v1")
            .build()
            .unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8080/v1/");
        assert_eq!(
            config.base_url().join("users/me").unwrap().as_str(),
            "http://localhost:8080/v1/users/me"
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        let result = ClientConfiguration::builder(key())
            .base_url("ftp://example.com")
            .build();
        assert!(matches!(result, Err(ValidationError::InvalidUrl { .. })));
    }

    #[test]
    fn proxy_parsing() {
        let proxy: HttpProxy = "proxy.internal:3128".parse().unwrap();
        assert_eq!(proxy.host(), "proxy.internal");
        assert_eq!(proxy.port(), 3128);
        assert_eq!(proxy.url(), "http://proxy.internal:3128");

        assert!("proxy.internal".parse::<HttpProxy>().is_err());
        assert!("proxy.internal:0".parse::<HttpProxy>().is_err());
        assert!(":8080".parse::<HttpProxy>().is_err());
    }

    #[test]
    fn logging_levels_parse_case_insensitively() {
        assert_eq!("HEADERS".parse(), Ok(HttpLoggingLevel::Headers));
        assert_eq!("all".parse(), Ok(HttpLoggingLevel::All));
        assert!("verbose".parse::<HttpLoggingLevel>().is_err());
        assert!(HttpLoggingLevel::All.includes_body());
        assert!(!HttpLoggingLevel::Info.includes_headers());
    }
}
