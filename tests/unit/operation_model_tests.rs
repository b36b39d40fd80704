/*!
 * Tests for the operation wire model and its payload invariant
 */

use serde_json::json;

use doctrans::errors::ApiError;
use doctrans::service::{Operation, OperationState, TerminalPayload};

use crate::common::{summary_payload, BATCH_RESPONSE_TYPE};

#[test]
fn test_from_json_withRunningOperation_shouldHaveNoPayload() {
    let operation = Operation::from_json(json!({
        "name": "operations/op-1",
        "done": false,
    }))
    .unwrap();

    assert_eq!(operation.name, "operations/op-1");
    assert_eq!(operation.state, OperationState::Running);
    assert!(!operation.is_done());
}

#[test]
fn test_from_json_withMissingDoneField_shouldDefaultToRunning() {
    let operation = Operation::from_json(json!({ "name": "operations/op-1" })).unwrap();
    assert_eq!(operation.state, OperationState::Running);
}

#[test]
fn test_from_json_withDoneAndResponse_shouldCarryResponsePayload() {
    let payload = summary_payload(10, 10, 0, 5000, 5000);
    let operation = Operation::from_json(json!({
        "name": "operations/op-1",
        "done": true,
        "response": payload.clone(),
    }))
    .unwrap();

    assert!(operation.is_done());
    match operation.state {
        OperationState::Done(TerminalPayload::Response(value)) => {
            assert_eq!(value["@type"], BATCH_RESPONSE_TYPE);
        }
        other => panic!("expected a response payload, got {:?}", other),
    }
}

#[test]
fn test_from_json_withDoneAndError_shouldCarryErrorPayload() {
    let operation = Operation::from_json(json!({
        "name": "operations/op-1",
        "done": true,
        "error": { "code": 7, "message": "permission denied" },
    }))
    .unwrap();

    match operation.state {
        OperationState::Done(TerminalPayload::Error(status)) => {
            assert_eq!(status.code, 7);
            assert_eq!(status.message, "permission denied");
        }
        other => panic!("expected an error payload, got {:?}", other),
    }
}

#[test]
fn test_from_json_withDoneAndBothPayloads_shouldFailDecoding() {
    let result = Operation::from_json(json!({
        "name": "operations/op-1",
        "done": true,
        "response": summary_payload(1, 1, 0, 10, 10),
        "error": { "code": 13, "message": "internal" },
    }));

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn test_from_json_withDoneAndNeitherPayload_shouldFailDecoding() {
    let result = Operation::from_json(json!({
        "name": "operations/op-1",
        "done": true,
    }));

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn test_from_json_withPayloadBeforeCompletion_shouldFailDecoding() {
    let result = Operation::from_json(json!({
        "name": "operations/op-1",
        "done": false,
        "response": summary_payload(1, 1, 0, 10, 10),
    }));

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn test_from_json_withNonObjectBody_shouldFailDecoding() {
    let result = Operation::from_json(json!("not an operation"));
    assert!(matches!(result, Err(ApiError::Decode(_))));
}
