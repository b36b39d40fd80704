/*!
 * # doctrans - Document Translation via Cloud Translation
 *
 * A Rust library and CLI for translating documents with a Cloud
 * Translation-style service.
 *
 * ## Features
 *
 * - Synchronous translation of a single local document (PDF, DOCX, ...)
 * - Batch translation of document sets addressed by storage patterns
 * - Long-running operation polling with a fixed interval and tunable
 *   transport-failure tolerance
 * - Typed decoding of terminal operation payloads (summary counts or a
 *   structured service error)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `request_builder`: Request validation and assembly
 * - `service`: Translation service boundary:
 *   - `service::rest`: REST client implementation
 * - `operation_poller`: Long-running operation polling
 * - `result_decoder`: Terminal payload decoding
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod request_builder;
pub mod service;
pub mod operation_poller;
pub mod result_decoder;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, PollingConfig, ServiceConfig};
pub use app_controller::Controller;
pub use operation_poller::{OperationPoller, PollPolicy};
pub use request_builder::{DocumentSource, RequestBuilder, TranslationRequest};
pub use result_decoder::{BatchOutcome, BatchSummary, ResultDecoder};
pub use service::{ErrorStatus, Operation, OperationState, SyncResult, TerminalPayload, TranslationApi};
pub use errors::{ApiError, AppError, ConfigError};
