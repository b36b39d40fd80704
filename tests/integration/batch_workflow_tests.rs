/*!
 * End-to-end batch workflow tests: build, submit, poll, decode against the
 * scripted mock service.
 */

use std::time::Duration;

use doctrans::errors::{ApiError, ConfigError};
use doctrans::operation_poller::{OperationPoller, PollPolicy};
use doctrans::request_builder::RequestBuilder;
use doctrans::result_decoder::{BatchOutcome, ResultDecoder};
use doctrans::service::TranslationApi;

use crate::common::mock_service::{MockService, PollStep};
use crate::common::{batch_config, error_operation, running_operation, success_operation, summary_payload};

fn fast_policy() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(1),
        transport_retries: 0,
    }
}

/// Two pending polls, then a terminal success whose counts survive decoding
/// unchanged.
#[tokio::test]
async fn test_batch_workflow_withEventualSuccess_shouldReportSummaryUnchanged() {
    let mock = MockService::with_poll_script(vec![
        PollStep::Status(running_operation("operations/test-op")),
        PollStep::Status(running_operation("operations/test-op")),
        PollStep::Status(success_operation("operations/test-op", summary_payload(10, 10, 0, 5000, 5000))),
    ]);

    let config = batch_config();
    let request = RequestBuilder::build(&config, None).unwrap();
    assert_eq!(request.target_languages(), ["zh-CN".to_string()]);

    let operation_name = mock.submit_batch(&request).await.unwrap();
    assert_eq!(operation_name, mock.operation_name());

    let poller = OperationPoller::new(&mock, fast_policy());
    let operation = poller.wait(&operation_name).await.unwrap();

    let outcome =
        ResultDecoder::decode(operation, request.output_prefix().unwrap_or_default()).unwrap();
    match outcome {
        BatchOutcome::Completed(summary) => {
            assert_eq!(summary.total_pages, 10);
            assert_eq!(summary.translated_pages, 10);
            assert_eq!(summary.failed_pages, 0);
            assert_eq!(summary.total_characters, 5000);
            assert_eq!(summary.translated_characters, 5000);
            assert_eq!(summary.output_prefix, "gs://bucket/results/");
        }
        other => panic!("expected a completed outcome, got {:?}", other),
    }

    assert_eq!(mock.submit_count(), 1);
    assert_eq!(mock.poll_count(), 3);
}

/// A terminal service error flows through the whole chain verbatim.
#[tokio::test]
async fn test_batch_workflow_withTerminalServiceError_shouldSurfaceCodeAndMessage() {
    let mock = MockService::with_poll_script(vec![
        PollStep::Status(running_operation("operations/test-op")),
        PollStep::Status(error_operation("operations/test-op", 7, "permission denied")),
    ]);

    let config = batch_config();
    let request = RequestBuilder::build(&config, None).unwrap();

    let operation_name = mock.submit_batch(&request).await.unwrap();
    let poller = OperationPoller::new(&mock, fast_policy());
    let operation = poller.wait(&operation_name).await.unwrap();

    let outcome =
        ResultDecoder::decode(operation, request.output_prefix().unwrap_or_default()).unwrap();
    match outcome {
        BatchOutcome::Failed(status) => {
            assert_eq!(status.code, 7);
            assert_eq!(status.message, "permission denied");
        }
        other => panic!("expected a failed outcome, got {:?}", other),
    }
}

/// Invalid configuration is rejected before any RPC is issued.
#[tokio::test]
async fn test_batch_workflow_withEmptyTargetLanguages_shouldIssueNoRpc() {
    let mock = MockService::with_poll_script(Vec::new());

    let mut config = batch_config();
    config.target_languages.clear();

    let result = RequestBuilder::build(&config, None);
    assert!(matches!(result, Err(ConfigError::NoTargetLanguages)));

    assert_eq!(mock.submit_count(), 0);
    assert_eq!(mock.poll_count(), 0);
}

/// A success payload of the wrong shape is a decode failure, not a service
/// failure, and the operation still counts as done.
#[tokio::test]
async fn test_batch_workflow_withMalformedSuccessPayload_shouldFailDecodingOnly() {
    let mock = MockService::with_poll_script(vec![
        PollStep::Status(success_operation(
            "operations/test-op",
            serde_json::json!({ "@type": "type.googleapis.com/google.protobuf.Empty" }),
        )),
    ]);

    let config = batch_config();
    let request = RequestBuilder::build(&config, None).unwrap();

    let operation_name = mock.submit_batch(&request).await.unwrap();
    let poller = OperationPoller::new(&mock, fast_policy());
    let operation = poller.wait(&operation_name).await.unwrap();
    assert!(operation.is_done());

    let result = ResultDecoder::decode(operation, request.output_prefix().unwrap_or_default());
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

/// A transport failure during polling aborts the chain with the default
/// policy; the operation is never decoded.
#[tokio::test]
async fn test_batch_workflow_withTransportFailureMidPoll_shouldAbort() {
    let mock = MockService::with_poll_script(vec![
        PollStep::Status(running_operation("operations/test-op")),
        PollStep::TransportFailure("connection reset by peer".to_string()),
    ]);

    let config = batch_config();
    let request = RequestBuilder::build(&config, None).unwrap();

    let operation_name = mock.submit_batch(&request).await.unwrap();
    let poller = OperationPoller::new(&mock, fast_policy());
    let result = poller.wait(&operation_name).await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
    assert_eq!(mock.poll_count(), 2);
}
