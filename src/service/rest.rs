use std::time::Duration;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Serialize, Deserialize};
use url::Url;
use log::error;

use crate::errors::ApiError;
use crate::request_builder::{DocumentSource, TranslationRequest};
use crate::service::{ErrorStatus, Operation, SyncResult, TranslationApi};

/// REST client for the document translation service
#[derive(Debug)]
pub struct RestClient {
    /// HTTP client for API requests
    client: Client,
    /// Service endpoint URL, no trailing slash
    endpoint: String,
    /// Bearer credential presented on every request
    access_token: String,
}

/// Inline document input for the synchronous call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentInputConfigWire {
    /// Base64-encoded document bytes
    content: String,
    /// MIME type the service parses the bytes as
    mime_type: String,
}

/// Synchronous translation request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateDocumentRequestWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_language_code: Option<String>,
    target_language_code: String,
    document_input_config: DocumentInputConfigWire,
}

/// Synchronous translation response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateDocumentResponseWire {
    document_translation: Option<DocumentTranslationWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentTranslationWire {
    /// Base64-encoded translated document chunks
    #[serde(default)]
    byte_stream_outputs: Vec<String>,
    #[serde(default)]
    mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GcsSourceWire {
    input_uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchDocumentInputConfigWire {
    gcs_source: GcsSourceWire,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GcsDestinationWire {
    output_uri_prefix: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchDocumentOutputConfigWire {
    gcs_destination: GcsDestinationWire,
}

/// Batch translation request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchTranslateDocumentRequestWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_language_code: Option<String>,
    target_language_codes: Vec<String>,
    input_configs: Vec<BatchDocumentInputConfigWire>,
    output_config: BatchDocumentOutputConfigWire,
    enable_shadow_removal_native_pdf: bool,
}

/// The name field of a freshly submitted operation
#[derive(Debug, Deserialize)]
struct SubmittedOperationWire {
    name: String,
}

/// Error envelope the service wraps failures in
#[derive(Debug, Deserialize)]
struct ErrorEnvelopeWire {
    error: ErrorStatus,
}

impl RestClient {
    /// Create a new client for the given endpoint and credential
    pub fn new(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)
            .map_err(|e| ApiError::Transport(format!("invalid service endpoint '{endpoint}': {e}")))?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// Issue a POST and return the parsed JSON body
    async fn post_json(&self, url: &str, body: &impl Serialize) -> Result<serde_json::Value, ApiError> {
        let response = self.client.post(url)
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to send request to {url}: {e}")))?;

        Self::read_body(url, response).await
    }

    /// Issue a GET and return the parsed JSON body
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, ApiError> {
        let response = self.client.get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to send request to {url}: {e}")))?;

        Self::read_body(url, response).await
    }

    /// Turn an HTTP response into a JSON body or a typed error.
    ///
    /// Rejected credentials count as a transport concern; any other failure
    /// carrying the service's error envelope is surfaced verbatim as a
    /// service error.
    async fn read_body(url: &str, response: reqwest::Response) -> Result<serde_json::Value, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Transport(
                "authentication rejected by the translation service".to_string(),
            ));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::Transport(format!("unknown resource at {url}")));
        }

        let text = response.text().await
            .map_err(|e| ApiError::Transport(format!("failed to read response from {url}: {e}")))?;

        if !status.is_success() {
            error!("Translation service error ({}): {}", status, text);
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelopeWire>(&text) {
                return Err(ApiError::Service {
                    code: envelope.error.code,
                    message: envelope.error.message,
                });
            }
            return Err(ApiError::Transport(format!("HTTP {status} from {url}: {text}")));
        }

        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("response from {url} is not valid JSON: {e}")))
    }
}

#[async_trait]
impl TranslationApi for RestClient {
    async fn submit_batch(&self, request: &TranslationRequest) -> Result<String, ApiError> {
        let pattern = match request.source() {
            DocumentSource::GcsPattern(pattern) => pattern.clone(),
            DocumentSource::Inline { .. } => {
                return Err(ApiError::Transport(
                    "batch submission requires a storage input pattern".to_string(),
                ));
            }
        };

        let body = BatchTranslateDocumentRequestWire {
            source_language_code: request.source_language().map(str::to_string),
            target_language_codes: request.target_languages().to_vec(),
            input_configs: vec![BatchDocumentInputConfigWire {
                gcs_source: GcsSourceWire { input_uri: pattern },
            }],
            output_config: BatchDocumentOutputConfigWire {
                gcs_destination: GcsDestinationWire {
                    output_uri_prefix: request.output_prefix().unwrap_or_default().to_string(),
                },
            },
            enable_shadow_removal_native_pdf: request.shadow_removal(),
        };

        let url = format!("{}/v3/{}:batchTranslateDocument", self.endpoint, request.parent());
        let value = self.post_json(&url, &body).await?;

        let submitted: SubmittedOperationWire = serde_json::from_value(value)
            .map_err(|e| ApiError::Decode(format!("submission response has no operation name: {e}")))?;
        Ok(submitted.name)
    }

    async fn get_operation(&self, name: &str) -> Result<Operation, ApiError> {
        let url = format!("{}/v3/{}", self.endpoint, name);
        let value = self.get_json(&url).await?;
        Operation::from_json(value)
    }

    async fn translate_sync(&self, request: &TranslationRequest) -> Result<SyncResult, ApiError> {
        let (content, mime_type) = match request.source() {
            DocumentSource::Inline { content, mime_type } => (content, mime_type.clone()),
            DocumentSource::GcsPattern(_) => {
                return Err(ApiError::Transport(
                    "synchronous translation requires inline document content".to_string(),
                ));
            }
        };

        let body = TranslateDocumentRequestWire {
            source_language_code: request.source_language().map(str::to_string),
            target_language_code: request.primary_target().to_string(),
            document_input_config: DocumentInputConfigWire {
                content: BASE64.encode(content),
                mime_type,
            },
        };

        let url = format!("{}/v3/{}:translateDocument", self.endpoint, request.parent());
        let value = self.post_json(&url, &body).await?;

        let response: TranslateDocumentResponseWire = serde_json::from_value(value)
            .map_err(|e| ApiError::Decode(format!("malformed translation response: {e}")))?;

        let translation = response.document_translation
            .ok_or_else(|| ApiError::Decode("translation response carries no document".to_string()))?;
        let encoded = translation.byte_stream_outputs.first()
            .ok_or_else(|| ApiError::Decode("translation response carries no output bytes".to_string()))?;
        let decoded = BASE64.decode(encoded)
            .map_err(|e| ApiError::Decode(format!("translated document is not valid base64: {e}")))?;
        if decoded.is_empty() {
            return Err(ApiError::Decode("translated document is empty".to_string()));
        }

        Ok(SyncResult {
            translated_bytes: Bytes::from(decoded),
            mime_type: translation.mime_type,
        })
    }
}
