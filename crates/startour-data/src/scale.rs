//! Selection of the visible set and uniform render-space scaling

use crate::error::{CatalogError, CatalogResult};
use crate::stars::{sort_by_distance, StarCatalog, StarRecord};
use serde::{Deserialize, Serialize};
use startour_core::constants::{DEFAULT_RENDER_DEPTH_LIMIT, DEFAULT_TARGET_COUNT, MIN_CATALOG_SIZE};

/// Parameters for picking and scaling the visible set
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionParams {
    /// Number of closest stars to hand to the renderer
    pub target_count: usize,
    /// Far clip of the rendering environment, in render units
    pub render_depth_limit: f64,
    /// Stars required after cleaning; the scale reference is the last of these
    pub min_catalog_size: usize,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            render_depth_limit: DEFAULT_RENDER_DEPTH_LIMIT,
            min_catalog_size: MIN_CATALOG_SIZE,
        }
    }
}

/// Distances the scale factor was derived from
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaleReference {
    /// Distance of the closest star
    pub min_distance: f64,
    /// Distance of the `min_catalog_size`-th closest star
    pub max_distance: f64,
    /// `max_distance / render_depth_limit`
    pub scale_factor: f64,
}

/// Derive the scale factor from a distance-sorted catalog
pub fn scale_reference(stars: &[StarRecord], params: &SelectionParams) -> CatalogResult<ScaleReference> {
    let required = params.min_catalog_size.max(1);
    if stars.len() < required {
        return Err(CatalogError::InsufficientData { actual: stars.len(), required });
    }

    let min_distance = stars[0].distance;
    let max_distance = stars[required - 1].distance;
    let scale_factor = max_distance / params.render_depth_limit;

    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(CatalogError::DegenerateScale(scale_factor));
    }

    Ok(ScaleReference { min_distance, max_distance, scale_factor })
}

/// Full catalog in render space plus the size of its visible prefix
#[derive(Clone, Debug)]
pub struct ScaledCatalog {
    stars: Vec<StarRecord>,
    visible_count: usize,
    reference: ScaleReference,
}

impl ScaledCatalog {
    /// The closest `min(target_count, len)` stars, closest first
    pub fn visible(&self) -> &[StarRecord] {
        &self.stars[..self.visible_count]
    }

    /// Every star, rescaled
    pub fn all(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn reference(&self) -> &ScaleReference {
        &self.reference
    }

    pub fn scale_factor(&self) -> f64 {
        self.reference.scale_factor
    }

    pub fn into_visible(mut self) -> Vec<StarRecord> {
        self.stars.truncate(self.visible_count);
        self.stars
    }
}

/// Sort, derive the scale factor, rescale every star, and mark the visible prefix.
///
/// Fails with `InsufficientData` when fewer than `min_catalog_size` stars remain.
pub fn select_and_scale(catalog: StarCatalog, params: &SelectionParams) -> CatalogResult<ScaledCatalog> {
    let mut stars = catalog.into_records();
    sort_by_distance(&mut stars);

    let reference = scale_reference(&stars, params)?;
    for star in &mut stars {
        star.rescale(reference.scale_factor);
    }

    let visible_count = params.target_count.min(stars.len());
    tracing::info!(
        "Selected {} of {} stars, scale factor {:.4} (reference distance {:.3})",
        visible_count,
        stars.len(),
        reference.scale_factor,
        reference.max_distance
    );

    Ok(ScaledCatalog { stars, visible_count, reference })
}

#[cfg(test)]
mod tests {
    use super::*;
    use startour_core::CatalogPosition;

    /// Stars along a ray, distance `step * (i + 1)`
    fn ray(count: usize, step: f64) -> StarCatalog {
        StarCatalog::from_records(
            (0..count)
                .map(|i| {
                    let d = step * (i + 1) as f64;
                    let dir = [(i % 5) as f64, 1.0, -((i % 3) as f64)];
                    let norm = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
                    let pos = CatalogPosition::new(dir[0] / norm * d, dir[1] / norm * d, dir[2] / norm * d);
                    StarRecord::new(format!("s{i}"), pos, d, 0.2)
                })
                .collect(),
        )
    }

    fn params(target_count: usize, render_depth_limit: f64, min_catalog_size: usize) -> SelectionParams {
        SelectionParams { target_count, render_depth_limit, min_catalog_size }
    }

    #[test]
    fn test_scale_factor_from_reference_star() {
        let scaled = select_and_scale(ray(100, 2.0), &params(10, 50.0, 40)).unwrap();
        // 40th closest star sits at 80.0
        assert_eq!(scaled.reference().max_distance, 80.0);
        assert_eq!(scaled.reference().min_distance, 2.0);
        assert_eq!(scaled.scale_factor(), 80.0 / 50.0);
        assert!((scaled.all()[39].distance - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_visible_is_prefix_of_rescaled_catalog() {
        let scaled = select_and_scale(ray(100, 2.0), &params(10, 50.0, 40)).unwrap();
        assert_eq!(scaled.visible().len(), 10);
        assert_eq!(scaled.visible(), &scaled.all()[..10]);
        assert!(scaled.visible().windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_visible_count_capped_by_catalog() {
        let scaled = select_and_scale(ray(30, 1.0), &params(5000, 100.0, 30)).unwrap();
        assert_eq!(scaled.visible().len(), 30);
        assert_eq!(scaled.into_visible().len(), 30);
    }

    #[test]
    fn test_every_star_is_rescaled() {
        let original = ray(60, 3.0);
        let before: Vec<_> = original.iter().cloned().collect();
        let scaled = select_and_scale(original, &params(5, 10.0, 20)).unwrap();
        let k = scaled.scale_factor();

        for (b, a) in before.iter().zip(scaled.all()) {
            assert!((a.position.x - b.position.x / k).abs() < 1e-9);
            assert!((a.position.y - b.position.y / k).abs() < 1e-9);
            assert!((a.position.z - b.position.z / k).abs() < 1e-9);
            assert_eq!(a.name, b.name);
            assert_eq!(a.color, b.color);
        }
    }

    #[test]
    fn test_order_preserved_after_scaling() {
        let scaled = select_and_scale(ray(200, 0.7), &params(50, 1000.0, 150)).unwrap();
        assert!(scaled.all().windows(2).all(|w| w[0].distance < w[1].distance));
        assert!(scaled
            .all()
            .windows(2)
            .all(|w| w[0].position.magnitude() < w[1].position.magnitude() + 1e-9));
    }

    #[test]
    fn test_insufficient_data_is_explicit() {
        match select_and_scale(ray(9, 1.0), &params(5, 10.0, 10)) {
            Err(CatalogError::InsufficientData { actual, required }) => {
                assert_eq!(actual, 9);
                assert_eq!(required, 10);
            }
            other => panic!("expected InsufficientData, got {:?}", other.map(|s| s.all().len())),
        }
    }

    #[test]
    fn test_zero_reference_distance_is_degenerate() {
        let stars = (0..3)
            .map(|i| StarRecord::new(format!("z{i}"), CatalogPosition::default(), 0.0, 0.0))
            .collect();
        let err = select_and_scale(StarCatalog::from_records(stars), &params(3, 10.0, 3)).unwrap_err();
        assert!(matches!(err, CatalogError::DegenerateScale(_)));
    }
}
