//! Catalog pipeline: load, clean, select and scale

use crate::error::{CatalogError, CatalogResult};
use crate::loader::{CatalogLoader, LoadReport};
use crate::parser::ColumnLayout;
use crate::scale::{select_and_scale, ScaledCatalog, SelectionParams};
use crate::source::{source_for, CatalogSource};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use startour_core::constants::{
    DEFAULT_RENDER_DEPTH_LIMIT, DEFAULT_TARGET_COUNT, HYG_V3_URL, MIN_CATALOG_SIZE, PROXIMITY_THRESHOLD,
};
use std::path::Path;

/// Pipeline configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// URL or local path of the catalog CSV
    pub data_source_url: String,
    pub target_count: usize,
    pub render_depth_limit: f64,
    pub proximity_threshold: f64,
    pub min_catalog_size: usize,
    pub columns: ColumnLayout,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_source_url: HYG_V3_URL.to_string(),
            target_count: DEFAULT_TARGET_COUNT,
            render_depth_limit: DEFAULT_RENDER_DEPTH_LIMIT,
            proximity_threshold: PROXIMITY_THRESHOLD,
            min_catalog_size: MIN_CATALOG_SIZE,
            columns: ColumnLayout::hyg_v3(),
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config: {}", path.display()))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse pipeline config JSON: {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if !(self.render_depth_limit.is_finite() && self.render_depth_limit > 0.0) {
            return Err(CatalogError::InvalidConfig(format!(
                "render_depth_limit must be positive, got {}",
                self.render_depth_limit
            )));
        }
        if !(self.proximity_threshold.is_finite() && self.proximity_threshold >= 0.0) {
            return Err(CatalogError::InvalidConfig(format!(
                "proximity_threshold must be non-negative, got {}",
                self.proximity_threshold
            )));
        }
        if self.target_count == 0 {
            return Err(CatalogError::InvalidConfig("target_count must be at least 1".into()));
        }
        if self.min_catalog_size == 0 {
            return Err(CatalogError::InvalidConfig("min_catalog_size must be at least 1".into()));
        }
        // The visible set has to end at or before the scale reference star
        if self.min_catalog_size < self.target_count {
            return Err(CatalogError::InvalidConfig(format!(
                "min_catalog_size ({}) must be at least target_count ({})",
                self.min_catalog_size, self.target_count
            )));
        }
        Ok(())
    }

    pub fn selection(&self) -> SelectionParams {
        SelectionParams {
            target_count: self.target_count,
            render_depth_limit: self.render_depth_limit,
            min_catalog_size: self.min_catalog_size,
        }
    }

    /// Source for `data_source_url`
    pub fn source(&self) -> Box<dyn CatalogSource> {
        source_for(&self.data_source_url)
    }
}

/// Main catalog pipeline
pub struct StarPipeline {
    config: PipelineConfig,
    loader: CatalogLoader,
}

impl StarPipeline {
    pub fn new(config: PipelineConfig) -> CatalogResult<Self> {
        config.validate()?;
        let loader = CatalogLoader::new(config.columns, config.proximity_threshold);
        Ok(Self { config, loader })
    }

    pub fn with_defaults() -> Self {
        let config = PipelineConfig::default();
        let loader = CatalogLoader::new(config.columns, config.proximity_threshold);
        Self { config, loader }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    /// Run against the configured source
    pub fn run_configured(&self) -> CatalogResult<(ScaledCatalog, LoadReport)> {
        let source = self.config.source();
        self.run_with_report(source.as_ref())
    }

    pub fn run(&self, source: &dyn CatalogSource) -> CatalogResult<ScaledCatalog> {
        self.run_with_report(source).map(|(scaled, _)| scaled)
    }

    pub fn run_with_report(&self, source: &dyn CatalogSource) -> CatalogResult<(ScaledCatalog, LoadReport)> {
        let (catalog, report) = self.loader.load_with_report(source)?;
        let scaled = select_and_scale(catalog, &self.config.selection())?;
        Ok((scaled, report))
    }
}
