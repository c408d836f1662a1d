//! Star catalog pipeline: parse, clean, select and scale the nearest stars

pub mod dedup;
pub mod error;
pub mod loader;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod scale;
pub mod source;
pub mod stars;
pub mod synthetic;

pub use dedup::dedup_adjacent;
pub use error::{CatalogError, CatalogResult, FetchError, RowError};
pub use loader::{parse_catalog_text, CatalogLoader, LoadReport, ParseOutcome};
pub use parser::{parse_row, ColumnLayout};
pub use pipeline::{PipelineConfig, StarPipeline};
pub use render::{render_instances, RenderStar};
pub use scale::{scale_reference, select_and_scale, ScaleReference, ScaledCatalog, SelectionParams};
pub use source::{source_for, CatalogSource, FileSource, HttpSource, StaticSource};
pub use stars::{StarCatalog, StarRecord};
pub use synthetic::{generate_synthetic_stars, synthetic_catalog_text, write_hyg_csv};
