/*!
 * Terminal payload decoding.
 *
 * A terminal operation carries exactly one of a success payload or a service
 * error. The decoder turns that payload into a typed value once: a service
 * error passes through verbatim, a success payload is checked against the
 * expected batch summary shape. A payload that does not match is a decode
 * failure, distinct from a service-reported failure, and does not change the
 * fact that the operation is done.
 */

use serde::{Deserialize, Deserializer};

use crate::errors::ApiError;
use crate::service::{ErrorStatus, Operation, OperationState, TerminalPayload};

/// Type tag the success payload must carry
const BATCH_RESPONSE_TYPE: &str =
    "type.googleapis.com/google.cloud.translation.v3.BatchTranslateDocumentResponse";

/// Counts reported for a completed batch translation
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Pages the service looked at
    pub total_pages: u64,
    /// Pages translated successfully
    pub translated_pages: u64,
    /// Pages that failed to translate
    pub failed_pages: u64,
    /// Characters the service looked at
    pub total_characters: u64,
    /// Characters translated successfully
    pub translated_characters: u64,
    /// Storage prefix the results were written under
    pub output_prefix: String,
}

/// What a terminal operation decoded to
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The batch completed; counts are available
    Completed(BatchSummary),
    /// The service reported a terminal failure, passed through unchanged
    Failed(ErrorStatus),
}

/// Wire shape of the batch success payload.
///
/// Count fields arrive as JSON strings per proto3 JSON rules for 64-bit
/// integers; plain numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchResponseWire {
    #[serde(rename = "@type", default)]
    type_url: String,
    #[serde(default, deserialize_with = "u64_lenient")]
    total_pages: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    translated_pages: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    failed_pages: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    total_characters: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    translated_characters: u64,
}

fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Decodes the terminal payload of a finished operation
pub struct ResultDecoder;

impl ResultDecoder {
    /// Decode a terminal operation into a typed outcome.
    ///
    /// The operation must be terminal; the wire response does not carry the
    /// output location, so the caller supplies the prefix the request named
    /// and it is stamped into the summary.
    pub fn decode(operation: Operation, output_prefix: &str) -> Result<BatchOutcome, ApiError> {
        let payload = match operation.state {
            OperationState::Running => {
                return Err(ApiError::Decode(format!(
                    "operation {} is not terminal",
                    operation.name
                )));
            }
            OperationState::Done(payload) => payload,
        };

        match payload {
            TerminalPayload::Error(status) => Ok(BatchOutcome::Failed(status)),
            TerminalPayload::Response(value) => {
                let wire: BatchResponseWire = serde_json::from_value(value)
                    .map_err(|e| ApiError::Decode(format!("malformed batch summary: {e}")))?;

                if wire.type_url != BATCH_RESPONSE_TYPE {
                    return Err(ApiError::Decode(format!(
                        "unexpected payload type '{}', expected '{}'",
                        wire.type_url, BATCH_RESPONSE_TYPE
                    )));
                }
                if wire.translated_pages + wire.failed_pages > wire.total_pages {
                    return Err(ApiError::Decode(format!(
                        "inconsistent page counts: {} translated + {} failed > {} total",
                        wire.translated_pages, wire.failed_pages, wire.total_pages
                    )));
                }
                if wire.translated_characters > wire.total_characters {
                    return Err(ApiError::Decode(format!(
                        "inconsistent character counts: {} translated > {} total",
                        wire.translated_characters, wire.total_characters
                    )));
                }

                Ok(BatchOutcome::Completed(BatchSummary {
                    total_pages: wire.total_pages,
                    translated_pages: wire.translated_pages,
                    failed_pages: wire.failed_pages,
                    total_characters: wire.total_characters,
                    translated_characters: wire.translated_characters,
                    output_prefix: output_prefix.to_string(),
                }))
            }
        }
    }
}
