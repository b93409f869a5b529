//! # pagelift - Product Page Extraction Pipeline
//!
//! This crate converts raw product-page HTML into validated, structured
//! product records while keeping the volume of text sent to the generative
//! extraction model as small as possible.
//!
//! ## Features
//!
//! - Tolerant HTML parsing (malformed markup never aborts a page)
//! - Extraction of high-signal structured fragments (JSON-LD, meta tags)
//! - Aggressive reduction of body text under a fixed content budget
//! - Deterministic payload assembly with a token-cost estimate
//! - Taxonomy-constrained category validation with approximate matching
//! - Post-extraction text cleaning and URL repair
//! - Batch orchestration with bounded concurrency and per-document
//!   failure isolation
//!
//! ## Example
//!
//! ```rust,no_run
//! use pagelift::extract::Extractor;
//! use pagelift::gemini::Client;
//! use pagelift::pipeline::{Pipeline, PipelineConfig, write_records};
//! use pagelift::taxonomy::Taxonomy;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let taxonomy = Arc::new(Taxonomy::load("categories.txt".as_ref())?);
//!     let client = Client::with_api_key("your-api-key");
//!     let extractor = Extractor::new(client, "gemini-2.0-flash-lite");
//!
//!     let config = PipelineConfig::builder()
//!         .input_dir("data")
//!         .concurrency(4)
//!         .build();
//!
//!     let outputs = config.outputs.clone();
//!     let pipeline = Pipeline::new(extractor, taxonomy, config);
//!     let report = pipeline.run().await?;
//!     write_records(&report.records, &outputs)?;
//!
//!     println!("{} records extracted", report.records.len());
//!     Ok(())
//! }
//! ```

mod error;

pub mod extract;
pub mod gemini;
pub mod pipeline;
pub mod preprocess;
pub mod record;
pub mod taxonomy;

pub use error::{Error, Result};
