/*!
 * Translation service boundary.
 *
 * This module defines the trait the rest of the application talks to the
 * remote translation service through, together with the operation model the
 * batch path observes:
 * - `translate_sync`: one blocking call for an in-memory document
 * - `submit_batch` / `get_operation`: submit-and-poll for document sets
 */

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ApiError;
use crate::request_builder::TranslationRequest;

/// Common trait for translation service clients
///
/// This trait is the seam between the operation lifecycle logic and the
/// service transport, allowing a scripted test double to stand in for the
/// real REST client.
#[async_trait]
pub trait TranslationApi: Send + Sync + Debug {
    /// Submit a batch translation and return the operation name.
    ///
    /// Returns as soon as the service has accepted the work; completion is
    /// observed through [`get_operation`](Self::get_operation).
    async fn submit_batch(&self, request: &TranslationRequest) -> Result<String, ApiError>;

    /// Fetch the current status of a long-running operation. Idempotent read.
    async fn get_operation(&self, name: &str) -> Result<Operation, ApiError>;

    /// Translate a single in-memory document, blocking until the service
    /// completes or fails.
    async fn translate_sync(&self, request: &TranslationRequest) -> Result<SyncResult, ApiError>;
}

/// A long-running operation handle as last observed from the service
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Opaque operation identifier
    pub name: String,
    /// The observed state
    pub state: OperationState,
}

/// Observed state of a long-running operation
#[derive(Debug, Clone, PartialEq)]
pub enum OperationState {
    /// The service is still working; no payload exists yet
    Running,
    /// Terminal: no further status change will occur
    Done(TerminalPayload),
}

/// The single payload a terminal operation carries
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalPayload {
    /// Success payload, decoded further by the result decoder
    Response(serde_json::Value),
    /// Failure reported by the service
    Error(ErrorStatus),
}

/// A structured error reported by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorStatus {
    /// Canonical status code
    #[serde(default)]
    pub code: i32,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// Result of a synchronous document translation
#[derive(Debug, Clone, PartialEq)]
pub struct SyncResult {
    /// The translated document, non-empty on success
    pub translated_bytes: Bytes,
    /// MIME type of the translated document
    pub mime_type: String,
}

/// Wire shape of a long-running operation as the service serializes it
#[derive(Debug, Deserialize)]
struct OperationWire {
    #[serde(default)]
    name: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    response: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<ErrorStatus>,
}

impl Operation {
    /// Decode an operation from its wire representation.
    ///
    /// Enforces the payload invariant: a running operation carries no
    /// payload, a terminal one carries exactly one of response or error.
    /// Anything else is a malformed status, reported as a decode failure.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ApiError> {
        let wire: OperationWire = serde_json::from_value(value)
            .map_err(|e| ApiError::Decode(format!("malformed operation status: {e}")))?;

        let state = match (wire.done, wire.response, wire.error) {
            (false, None, None) => OperationState::Running,
            (false, _, _) => {
                return Err(ApiError::Decode(
                    "operation carries a terminal payload before completion".to_string(),
                ));
            }
            (true, Some(response), None) => OperationState::Done(TerminalPayload::Response(response)),
            (true, None, Some(error)) => OperationState::Done(TerminalPayload::Error(error)),
            (true, Some(_), Some(_)) => {
                return Err(ApiError::Decode(
                    "terminal operation carries both a response and an error".to_string(),
                ));
            }
            (true, None, None) => {
                return Err(ApiError::Decode(
                    "terminal operation carries neither a response nor an error".to_string(),
                ));
            }
        };

        Ok(Self { name: wire.name, state })
    }

    /// Whether the operation has reached a terminal state
    pub fn is_done(&self) -> bool {
        matches!(self.state, OperationState::Done(_))
    }
}

pub mod rest;
