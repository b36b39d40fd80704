use anyhow::{Result, anyhow};
use log::{error, info};
use std::path::PathBuf;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::operation_poller::{OperationPoller, PollPolicy};
use crate::request_builder::{DocumentSource, RequestBuilder};
use crate::result_decoder::{BatchOutcome, ResultDecoder};
use crate::service::Operation;
use crate::service::TranslationApi;
use crate::service::rest::RestClient;

// @module: Application controller for document translation

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.project_id.is_empty() && !self.config.target_languages.is_empty()
    }

    /// Translate a single local document synchronously.
    ///
    /// Reads the document, issues one blocking translation call, and writes
    /// the translated bytes unmodified. No retry on failure; transport and
    /// service errors propagate to the caller.
    pub async fn run_sync(&self, input_file: PathBuf, output_file: Option<PathBuf>) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        info!("Reading document: {:?}", input_file);
        let content = FileManager::read_bytes(&input_file)?;
        let request = RequestBuilder::build(&self.config, Some(content))?;

        // The client lives for this one call chain and is dropped on every
        // exit path when the scope ends.
        let client = RestClient::new(
            &self.config.service.endpoint,
            &self.config.service.access_token,
            self.config.service.timeout_secs,
        )?;

        info!("Sending translation request to {}", request.parent());
        let result = client.translate_sync(&request).await?;

        let output_path = output_file.unwrap_or_else(|| {
            FileManager::default_output_path(&input_file, request.primary_target())
        });
        FileManager::write_bytes(&output_path, &result.translated_bytes)?;

        info!("Translated document saved to {:?} ({} bytes, {:.1}s)",
            output_path,
            result.translated_bytes.len(),
            start_time.elapsed().as_secs_f64());
        Ok(())
    }

    /// Submit a batch translation and follow it to completion.
    ///
    /// Submits the configured storage pattern, polls the returned operation
    /// until terminal, and reports either the summary counts or the service
    /// error verbatim.
    pub async fn run_batch(&self) -> Result<()> {
        let start_time = std::time::Instant::now();

        let request = RequestBuilder::build(&self.config, None)?;
        let output_prefix = request.output_prefix().unwrap_or_default().to_string();

        let client = RestClient::new(
            &self.config.service.endpoint,
            &self.config.service.access_token,
            self.config.service.timeout_secs,
        )?;

        info!("Submitting batch translation for {}",
            match request.source() {
                DocumentSource::GcsPattern(pattern) => pattern.as_str(),
                DocumentSource::Inline { .. } => "<inline>",
            });
        let operation_name = client.submit_batch(&request).await?;
        info!("Operation submitted: {}", operation_name);

        let operation = self.follow_operation(&client, &operation_name).await?;

        match ResultDecoder::decode(operation, &output_prefix)? {
            BatchOutcome::Completed(summary) => {
                info!("Batch translation finished in {:.1}s", start_time.elapsed().as_secs_f64());
                info!("Total pages: {}", summary.total_pages);
                info!("Translated pages: {}", summary.translated_pages);
                info!("Failed pages: {}", summary.failed_pages);
                info!("Total characters: {}", summary.total_characters);
                info!("Translated characters: {}", summary.translated_characters);
                info!("Results written under: {}", summary.output_prefix);
            }
            BatchOutcome::Failed(status) => {
                error!("Batch translation failed: [{}] {}", status.code, status.message);
            }
        }
        Ok(())
    }

    /// Poll the operation behind a spinner until it is terminal
    async fn follow_operation(
        &self,
        client: &RestClient,
        operation_name: &str,
    ) -> Result<Operation> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message(format!("Waiting for operation {operation_name}"));

        let poller = OperationPoller::new(client, PollPolicy::from(&self.config.polling));
        let outcome = poller
            .wait_with_progress(operation_name, |polls| {
                spinner.set_message(format!("Operation still running ({polls} checks so far)"));
            })
            .await;

        spinner.finish_and_clear();
        Ok(outcome?)
    }
}
