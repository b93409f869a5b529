//! Pipeline configuration

use std::path::PathBuf;

/// Configuration for a batch extraction run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the markup documents to process
    pub input_dir: PathBuf,

    /// Destination paths for the serialized records
    pub outputs: Vec<PathBuf>,

    /// Path to the category taxonomy file
    pub taxonomy_path: PathBuf,

    /// Model identifier for extraction
    pub model: String,

    /// Maximum number of documents processed concurrently
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            outputs: vec![PathBuf::from("products.json")],
            taxonomy_path: PathBuf::from("categories.txt"),
            model: "gemini-2.0-flash-lite".to_string(),
            concurrency: 4,
        }
    }
}

impl PipelineConfig {
    /// Create a builder for the configuration
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for [`PipelineConfig`]
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    /// Set the input directory
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    /// Set the output destinations
    pub fn outputs(mut self, outputs: Vec<PathBuf>) -> Self {
        self.config.outputs = outputs;
        self
    }

    /// Set the taxonomy file path
    pub fn taxonomy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.taxonomy_path = path.into();
        self
    }

    /// Set the extraction model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the concurrency limit
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency.max(1);
        self
    }

    /// Build the configuration
    pub fn build(self) -> PipelineConfig {
        self.config
    }
}
