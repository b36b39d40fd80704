/*!
 * Translation request assembly.
 *
 * This module validates the configuration surface and produces the immutable
 * request descriptor both the synchronous and the batch path submit to the
 * translation service. Validation is pure: a rejected configuration never
 * reaches the network.
 */

use bytes::Bytes;

use crate::app_config::Config;
use crate::errors::ConfigError;

/// Where the document bytes come from
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// A single document held in memory, translated synchronously
    Inline {
        /// Raw document bytes, passed through opaque
        content: Bytes,
        /// MIME type the service parses the bytes as
        mime_type: String,
    },
    /// A storage pattern addressing one or more documents, translated as a batch
    GcsPattern(String),
}

impl DocumentSource {
    /// Whether this source addresses a document set in object storage
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::GcsPattern(_))
    }
}

/// An immutable, validated translation request descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    parent: String,
    source_language: Option<String>,
    target_languages: Vec<String>,
    source: DocumentSource,
    output_prefix: Option<String>,
    shadow_removal: bool,
}

impl TranslationRequest {
    /// The parent resource name requests are scoped to
    pub fn parent(&self) -> &str {
        &self.parent
    }

    /// The source language, `None` when the service should detect it
    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    /// The target language codes, in submission order
    pub fn target_languages(&self) -> &[String] {
        &self.target_languages
    }

    /// The first target language; the synchronous call translates into exactly one
    pub fn primary_target(&self) -> &str {
        self.target_languages.first().map(String::as_str).unwrap_or_default()
    }

    /// The document source
    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    /// The storage prefix batch results are written under
    pub fn output_prefix(&self) -> Option<&str> {
        self.output_prefix.as_deref()
    }

    /// Whether shadow removal is requested for native PDF batch input
    pub fn shadow_removal(&self) -> bool {
        self.shadow_removal
    }
}

/// Builds validated [`TranslationRequest`] values from configuration
pub struct RequestBuilder;

impl RequestBuilder {
    /// Assemble a request from configuration and optional inline document bytes.
    ///
    /// Inline bytes select the synchronous path; a configured storage pattern
    /// selects the batch path. Supplying both is rejected, as is an empty
    /// target language list, inline content without a MIME type, or a batch
    /// pattern without an output prefix.
    pub fn build(config: &Config, content: Option<Bytes>) -> Result<TranslationRequest, ConfigError> {
        if config.project_id.is_empty() {
            return Err(ConfigError::MissingProject);
        }
        if config.target_languages.is_empty() {
            return Err(ConfigError::NoTargetLanguages);
        }

        let source = match (content, config.gcs_input_pattern.as_str()) {
            (Some(_), pattern) if !pattern.is_empty() => return Err(ConfigError::AmbiguousInput),
            (Some(bytes), _) => {
                if config.mime_type.is_empty() {
                    return Err(ConfigError::MissingMimeType);
                }
                DocumentSource::Inline {
                    content: bytes,
                    mime_type: config.mime_type.clone(),
                }
            }
            (None, "") => return Err(ConfigError::MissingInput),
            (None, pattern) => DocumentSource::GcsPattern(pattern.to_string()),
        };

        let output_prefix = if source.is_batch() {
            if config.gcs_output_prefix.is_empty() {
                return Err(ConfigError::MissingOutputPrefix);
            }
            Some(config.gcs_output_prefix.clone())
        } else {
            None
        };

        let source_language = if config.auto_detect_source() {
            None
        } else {
            Some(config.source_language.clone())
        };

        Ok(TranslationRequest {
            parent: config.parent(),
            source_language,
            target_languages: config.target_languages.clone(),
            source,
            output_prefix,
            shadow_removal: config.shadow_removal,
        })
    }
}
