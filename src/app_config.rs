use serde::{Deserialize, Serialize};
use std::default::Default;
use std::time::Duration;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Cloud project identifier the requests are billed to
    #[serde(default)]
    pub project_id: String,

    /// Service location (e.g. "global" or a regional endpoint like "us-central1")
    #[serde(default = "default_location")]
    pub location: String,

    /// Source language code (ISO), empty or "auto" lets the service detect it
    #[serde(default)]
    pub source_language: String,

    /// Target language codes (ISO), at least one required
    #[serde(default)]
    pub target_languages: Vec<String>,

    /// MIME type of the document to translate (e.g. "application/pdf")
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Storage pattern addressing the batch input documents
    /// (e.g. "gs://bucket/docs/*")
    #[serde(default)]
    pub gcs_input_pattern: String,

    /// Storage prefix the batch results are written under
    /// (e.g. "gs://bucket/results/")
    #[serde(default)]
    pub gcs_output_prefix: String,

    /// Strip text shadows from native PDF documents during batch translation
    #[serde(default = "default_true")]
    pub shadow_removal: bool,

    /// Translation service connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Operation polling settings
    #[serde(default)]
    pub polling: PollingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            location: default_location(),
            source_language: String::new(),
            target_languages: Vec::new(),
            mime_type: default_mime_type(),
            gcs_input_pattern: String::new(),
            gcs_output_prefix: String::new(),
            shadow_removal: true,
            service: ServiceConfig::default(),
            polling: PollingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Render the parent resource name the service scopes requests to
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.location)
    }

    /// Whether the source language should be auto-detected by the service
    pub fn auto_detect_source(&self) -> bool {
        self.source_language.is_empty() || self.source_language.eq_ignore_ascii_case("auto")
    }
}

/// Translation service connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// OAuth access token presented as a Bearer credential.
    /// Obtaining the token is the caller's concern.
    #[serde(default = "String::new")]
    pub access_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Operation polling configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PollingConfig {
    /// Seconds to wait between status checks of a running operation
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,

    /// Consecutive transport failures tolerated while polling before giving up.
    ///
    /// The default of 0 aborts on the first transport failure, while a running
    /// operation is re-checked indefinitely. Raise this to also ride out
    /// transient connectivity blips between status checks.
    #[serde(default)]
    pub transport_retries: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
            transport_retries: 0,
        }
    }
}

impl PollingConfig {
    /// The configured inter-poll delay
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_location() -> String {
    "global".to_string()
}

fn default_mime_type() -> String {
    "application/pdf".to_string()
}

fn default_endpoint() -> String {
    "https://translation.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}
