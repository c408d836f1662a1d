
/// HYG v3 catalog, the default data source
pub const HYG_V3_URL: &str =
    "https://raw.githubusercontent.com/astronexus/HYG-Database/master/hygdata_v3.csv";

/// Number of closest stars handed to the renderer
pub const DEFAULT_TARGET_COUNT: usize = 5000;

/// Stars required after cleaning; the scale reference is the last of these
pub const MIN_CATALOG_SIZE: usize = 10_000;

/// Adjacent stars closer than this (catalog units) are collapsed
pub const PROXIMITY_THRESHOLD: f64 = 5.0;

/// Far clip used when the rendering environment supplies none
pub const DEFAULT_RENDER_DEPTH_LIMIT: f64 = 1000.0;

/// Color index band edges (B-V)
pub const BLUE_WHITE_EDGE: f64 = -0.4;
pub const WHITE_YELLOW_EDGE: f64 = 0.0;
pub const YELLOW_RED_EDGE: f64 = 0.4;
