/*!
 * End-to-end synchronous translation tests against the mock service.
 */

use bytes::Bytes;

use doctrans::errors::ApiError;
use doctrans::file_utils::FileManager;
use doctrans::request_builder::RequestBuilder;
use doctrans::service::TranslationApi;

use crate::common;
use crate::common::mock_service::MockService;
use crate::common::sync_config;

/// A small stand-in for a multi-page PDF document
fn three_page_pdf() -> Bytes {
    let mut content = b"%PDF-1.4\n".to_vec();
    for page in 1..=3 {
        content.extend_from_slice(format!("<< /Type /Page /Number {} >>\n", page).as_bytes());
    }
    content.extend_from_slice(b"%%EOF\n");
    Bytes::from(content)
}

/// Scenario: translate a document, write the bytes out, read them back
/// byte-identical.
#[tokio::test]
async fn test_sync_workflow_withPdfInput_shouldWriteBytesUnmodified() -> anyhow::Result<()> {
    let mock = MockService::sync_working();
    let config = sync_config();

    let request = RequestBuilder::build(&config, Some(three_page_pdf()))?;
    let result = mock.translate_sync(&request).await?;
    assert!(!result.translated_bytes.is_empty());

    let temp_dir = common::create_temp_dir()?;
    let output_path = temp_dir.path().join("report.zh-CN.pdf");
    FileManager::write_bytes(&output_path, &result.translated_bytes)?;

    let restored = FileManager::read_bytes(&output_path)?;
    assert_eq!(restored, result.translated_bytes);

    assert_eq!(mock.sync_count(), 1);
    Ok(())
}

/// Identical input bytes, language pair, and MIME type produce identical
/// output across independent runs.
#[tokio::test]
async fn test_sync_workflow_withIdenticalInputs_shouldBeDeterministic() -> anyhow::Result<()> {
    let config = sync_config();

    let first_run = {
        let mock = MockService::sync_working();
        let request = RequestBuilder::build(&config, Some(three_page_pdf()))?;
        mock.translate_sync(&request).await?
    };

    let second_run = {
        let mock = MockService::sync_working();
        let request = RequestBuilder::build(&config, Some(three_page_pdf()))?;
        mock.translate_sync(&request).await?
    };

    assert_eq!(first_run.translated_bytes, second_run.translated_bytes);
    assert_eq!(first_run.mime_type, second_run.mime_type);
    Ok(())
}

/// A remote-reported failure propagates verbatim, with no retry.
#[tokio::test]
async fn test_sync_workflow_withServiceError_shouldPropagateUnchanged() -> anyhow::Result<()> {
    let mock = MockService::sync_service_error(3, "unsupported document format");
    let config = sync_config();

    let request = RequestBuilder::build(&config, Some(three_page_pdf()))?;
    let result = mock.translate_sync(&request).await;

    match result {
        Err(ApiError::Service { code, message }) => {
            assert_eq!(code, 3);
            assert_eq!(message, "unsupported document format");
        }
        other => panic!("expected a service error, got {:?}", other),
    }
    assert_eq!(mock.sync_count(), 1);
    Ok(())
}

/// A transport failure propagates as such, with no retry.
#[tokio::test]
async fn test_sync_workflow_withTransportFailure_shouldPropagate() -> anyhow::Result<()> {
    let mock = MockService::sync_transport_failure("dns lookup failed");
    let config = sync_config();

    let request = RequestBuilder::build(&config, Some(three_page_pdf()))?;
    let result = mock.translate_sync(&request).await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
    assert_eq!(mock.sync_count(), 1);
    Ok(())
}

/// The translated MIME type follows the request's input MIME type.
#[tokio::test]
async fn test_sync_workflow_withDocxMimeType_shouldEchoMimeType() -> anyhow::Result<()> {
    let mock = MockService::sync_working();
    let mut config = sync_config();
    config.mime_type =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string();

    let request = RequestBuilder::build(&config, Some(Bytes::from_static(b"PK\x03\x04 docx")))?;
    let result = mock.translate_sync(&request).await?;

    assert_eq!(
        result.mime_type,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    Ok(())
}
