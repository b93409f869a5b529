//! Batch extraction pipeline
//!
//! # Product Extraction Pipeline
//!
//! Orchestrates the full document-to-record flow over a directory of
//! saved product pages:
//!
//! - Lists `.html` documents in the input directory
//! - Preprocesses each into a compact payload
//! - Dispatches payloads to the extraction boundary concurrently,
//!   bounded by a semaphore
//! - Validates and normalizes each raw result into a [`ProductRecord`]
//! - Aggregates per-document outcomes into a [`BatchReport`]
//!
//! One failing document never aborts the batch; failures are logged and
//! counted.

mod config;
mod error;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::PipelineError;

use crate::extract::Extractor;
use crate::preprocess::preprocess;
use crate::record::ProductRecord;
use crate::taxonomy::Taxonomy;
use futures::future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

/// Input price per million tokens for the extraction model, in USD
pub const INPUT_PRICE_PER_MILLION: f64 = 0.075;

/// Aggregated outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// The validated records, in input order
    pub records: Vec<ProductRecord>,

    /// Number of documents that produced a record
    pub succeeded: usize,

    /// Number of documents that failed at any stage
    pub failed: usize,

    /// Estimated payload tokens dispatched across the batch
    pub estimated_tokens: usize,
}

impl BatchReport {
    /// Total number of documents attempted
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Estimated input cost of the batch in USD
    pub fn estimated_cost(&self) -> f64 {
        self.estimated_tokens as f64 / 1_000_000.0 * INPUT_PRICE_PER_MILLION
    }
}

/// The batch extraction pipeline
pub struct Pipeline {
    extractor: Extractor,
    taxonomy: Arc<Taxonomy>,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline from its parts
    pub fn new(extractor: Extractor, taxonomy: Arc<Taxonomy>, config: PipelineConfig) -> Self {
        Self {
            extractor,
            taxonomy,
            config,
        }
    }

    /// List the `.html` documents in the input directory, sorted by path
    fn list_documents(&self) -> Result<Vec<PathBuf>, PipelineError> {
        let mut documents = Vec::new();
        for entry in std::fs::read_dir(&self.config.input_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("html") {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }

    /// Run the batch over every document in the input directory
    ///
    /// # Returns
    ///
    /// A report with the validated records and per-document outcome
    /// counts. Fails only when the input directory itself cannot be
    /// listed.
    #[instrument(skip(self), fields(input_dir = %self.config.input_dir.display()))]
    pub async fn run(&self) -> Result<BatchReport, PipelineError> {
        let documents = self.list_documents()?;
        info!(
            "Processing {} documents with concurrency {}",
            documents.len(),
            self.config.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let mut handles = Vec::with_capacity(documents.len());

        for path in documents {
            let semaphore = Arc::clone(&semaphore);
            let extractor = self.extractor.clone();
            let taxonomy = Arc::clone(&self.taxonomy);

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return (path, 0, Err(PipelineError::Task(e.to_string())));
                    }
                };
                let (tokens, outcome) = process_document(&path, &extractor, &taxonomy).await;
                (path, tokens, outcome)
            }));
        }

        let mut report = BatchReport::default();
        for result in future::join_all(handles).await {
            match result {
                Ok((path, tokens, outcome)) => {
                    // Dispatched payload tokens count toward the batch
                    // cost whether or not the extraction succeeded.
                    report.estimated_tokens += tokens;
                    match outcome {
                        Ok(record) => {
                            info!("Extracted record from {}", path.display());
                            if let Ok(json) = serde_json::to_string_pretty(&record) {
                                debug!("Record from {}:\n{}", path.display(), json);
                            }
                            report.records.push(record);
                            report.succeeded += 1;
                        }
                        Err(e) => {
                            warn!("Document failed: {}", e);
                            report.failed += 1;
                        }
                    }
                }
                Err(e) => {
                    warn!("Worker task failed: {}", e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Batch complete: {} succeeded, {} failed",
            report.succeeded, report.failed
        );
        Ok(report)
    }
}

/// Process a single document end to end
///
/// Returns the payload token estimate alongside the outcome: once a
/// payload has been built and dispatched its tokens are spent, so they
/// are reported even when the extraction or validation stage fails.
/// Failures before a payload exists report zero tokens.
async fn process_document(
    path: &Path,
    extractor: &Extractor,
    taxonomy: &Taxonomy,
) -> (usize, Result<ProductRecord, PipelineError>) {
    let markup = match std::fs::read_to_string(path) {
        Ok(markup) => markup,
        Err(e) => {
            return (
                0,
                Err(PipelineError::Other(format!("{}: {}", path.display(), e))),
            );
        }
    };
    let payload = match preprocess(&markup) {
        Ok(payload) => payload,
        Err(e) => return (0, Err(e.into())),
    };
    let tokens = payload.estimated_tokens;

    let raw = match extractor.extract(&payload).await {
        Ok(raw) => raw,
        Err(e) => {
            return (
                tokens,
                Err(PipelineError::Extraction(format!(
                    "{}: {}",
                    path.display(),
                    e
                ))),
            );
        }
    };
    match ProductRecord::from_raw(raw, taxonomy) {
        Ok(record) => (tokens, Ok(record)),
        Err(e) => (tokens, Err(e.into())),
    }
}

/// Serialize records as pretty JSON to every destination
///
/// Each destination is written atomically: the content lands in a
/// sibling `.tmp` file first and is renamed into place.
pub fn write_records(records: &[ProductRecord], outputs: &[PathBuf]) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| PipelineError::Other(format!("Serialization failed: {}", e)))?;

    for output in outputs {
        let tmp = output.with_extension("tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, output)?;
        info!("Wrote {} records to {}", records.len(), output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::Client;
    use mockito::Server;
    use serde_json::json;
    use tempfile::tempdir;

    fn page(name: &str) -> String {
        format!(
            r#"<html><head><title>{name}</title>
            <meta name="description" content="A product page">
            </head><body><h1>{name}</h1><p>Great product.</p></body></html>"#
        )
    }

    fn response_body() -> String {
        let product = json!({
            "name": "Test Pants",
            "price": {"amount": 49.0, "currency": "USD"},
            "description": "Comfortable pants",
            "key_features": [],
            "image_urls": [],
            "video_url": null,
            "category": {"name": "Apparel & Accessories > Clothing > Pants"},
            "brand": "TestBrand",
            "colors": [],
            "variants": []
        });
        json!({
            "candidates": [{"content": {"parts": [{"text": product.to_string()}]}}]
        })
        .to_string()
    }

    fn test_taxonomy() -> Arc<Taxonomy> {
        Arc::new(
            Taxonomy::new(vec![
                "Apparel & Accessories > Clothing > Pants".to_string(),
                "Apparel & Accessories > Shoes".to_string(),
            ])
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_run_isolates_document_failures() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.html"), page("Alpha")).unwrap();
        std::fs::write(dir.path().join("b.html"), page("Beta")).unwrap();
        // a directory with the document extension fails the read step
        std::fs::create_dir(dir.path().join("broken.html")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut server = Server::new_async().await;
        let mock_server = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-lite:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body())
            .expect(2)
            .create_async()
            .await;

        let mut client = Client::with_api_key("test-key");
        client.set_base_url(server.url());
        let extractor = Extractor::new(client, "gemini-2.0-flash-lite");

        let config = PipelineConfig::builder()
            .input_dir(dir.path())
            .concurrency(2)
            .build();
        let pipeline = Pipeline::new(extractor, test_taxonomy(), config);

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total(), 3);
        assert_eq!(report.records.len(), 2);
        assert!(report.estimated_tokens > 0);
        mock_server.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_extraction_still_counts_tokens() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.html"), page("Alpha")).unwrap();

        let mut server = Server::new_async().await;
        let _mock_server = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-lite:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let mut client = Client::with_api_key("test-key");
        client.set_base_url(server.url());
        let extractor = Extractor::new(client, "gemini-2.0-flash-lite");

        let config = PipelineConfig::builder().input_dir(dir.path()).build();
        let pipeline = Pipeline::new(extractor, test_taxonomy(), config);

        let report = pipeline.run().await.unwrap();
        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 1);
        // The payload was dispatched, so its tokens are spent
        assert!(report.estimated_tokens > 0);
    }

    #[tokio::test]
    async fn test_run_missing_input_dir_errors() {
        let mut client = Client::with_api_key("test-key");
        client.set_base_url("http://127.0.0.1:9".to_string());
        let extractor = Extractor::new(client, "gemini-2.0-flash-lite");

        let config = PipelineConfig::builder()
            .input_dir("/nonexistent/input/dir")
            .build();
        let pipeline = Pipeline::new(extractor, test_taxonomy(), config);

        assert!(pipeline.run().await.is_err());
    }

    #[tokio::test]
    async fn test_write_records_to_multiple_outputs() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.html"), page("Alpha")).unwrap();

        let mut server = Server::new_async().await;
        let _mock_server = server
            .mock(
                "POST",
                "/v1beta/models/gemini-2.0-flash-lite:generateContent",
            )
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(response_body())
            .create_async()
            .await;

        let mut client = Client::with_api_key("test-key");
        client.set_base_url(server.url());
        let extractor = Extractor::new(client, "gemini-2.0-flash-lite");

        let config = PipelineConfig::builder().input_dir(dir.path()).build();
        let pipeline = Pipeline::new(extractor, test_taxonomy(), config);
        let report = pipeline.run().await.unwrap();

        let out_a = dir.path().join("out_a.json");
        let out_b = dir.path().join("out_b.json");
        write_records(&report.records, &[out_a.clone(), out_b.clone()]).unwrap();

        let written = std::fs::read_to_string(&out_a).unwrap();
        assert_eq!(written, std::fs::read_to_string(&out_b).unwrap());
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed[0]["name"], "Test Pants");
        assert_eq!(
            parsed[0]["category"]["name"],
            "Apparel & Accessories > Clothing > Pants"
        );
        assert!(!dir.path().join("out_a.tmp").exists());
    }

    #[test]
    fn test_report_cost_estimate() {
        let report = BatchReport {
            estimated_tokens: 2_000_000,
            ..Default::default()
        };
        assert!((report.estimated_cost() - 0.15).abs() < 1e-9);
    }
}
