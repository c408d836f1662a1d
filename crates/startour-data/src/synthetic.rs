//! Deterministic synthetic catalogs in the HYG v3 CSV layout

use crate::stars::StarRecord;
use anyhow::Result;
use startour_core::CatalogPosition;
use std::io::Write;

/// HYG v3 header; the parser only reads `proper`, `dist`, `ci` and `x,y,z`
pub const HYG_V3_HEADER: [&str; 20] = [
    "id", "hip", "hd", "hr", "gl", "bf", "proper", "ra", "dec", "dist",
    "pmra", "pmdec", "rv", "mag", "absmag", "spect", "ci", "x", "y", "z",
];

/// Outer radius of synthetic catalogs, in parsecs
pub const MAX_DISTANCE_PC: f64 = 200.0;

/// Generate synthetic stars for testing (deterministic)
pub fn generate_synthetic_stars(count: usize, seed: u64) -> Vec<StarRecord> {
    let mut rng = seed;
    let mut rand = || {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (rng >> 11) as f64 / (1u64 << 53) as f64
    };

    (0..count)
        .map(|i| {
            let ra = rand() * std::f64::consts::TAU;
            let dec = (rand() * 2.0 - 1.0).asin();

            // Uniform in volume between 1 pc and MAX_DISTANCE_PC
            let distance = (1.0 + rand() * (MAX_DISTANCE_PC.powi(3) - 1.0)).cbrt();

            let x = distance * dec.cos() * ra.cos();
            let y = distance * dec.cos() * ra.sin();
            let z = distance * dec.sin();

            let color_index = -0.4 + rand() * 2.4;

            StarRecord::new(format!("SYN {}", i + 1), CatalogPosition::new(x, y, z), distance, color_index)
        })
        .collect()
}

/// Write stars as HYG v3 CSV
pub fn write_hyg_csv<W: Write>(stars: &[StarRecord], writer: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(HYG_V3_HEADER)?;

    for (i, s) in stars.iter().enumerate() {
        let id = (i + 1).to_string();
        let dist = s.distance.to_string();
        let ci = s.color_index.to_string();
        let (x, y, z) = (s.position.x.to_string(), s.position.y.to_string(), s.position.z.to_string());

        w.write_record([
            id.as_str(), "", "", "", "", "", s.name.as_str(), "", "", dist.as_str(),
            "", "", "", "", "", "", ci.as_str(), x.as_str(), y.as_str(), z.as_str(),
        ])?;
    }

    w.flush()?;
    Ok(())
}

/// Synthetic HYG v3 CSV text
pub fn synthetic_catalog_text(count: usize, seed: u64) -> Result<String> {
    let mut buf = Vec::new();
    write_hyg_csv(&generate_synthetic_stars(count, seed), &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CatalogLoader;

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_synthetic_stars(50, 7), generate_synthetic_stars(50, 7));
        assert_ne!(generate_synthetic_stars(50, 7), generate_synthetic_stars(50, 8));
    }

    #[test]
    fn test_distance_matches_position() {
        for star in generate_synthetic_stars(500, 42) {
            assert!((star.position.magnitude() - star.distance).abs() < 1e-9 * star.distance.max(1.0));
            assert!(star.distance >= 1.0 && star.distance <= MAX_DISTANCE_PC);
        }
    }

    #[test]
    fn test_written_catalog_loads_back() {
        let text = synthetic_catalog_text(300, 3).unwrap();
        assert!(text.starts_with("id,hip,hd,hr,gl,bf,proper,ra,dec,dist"));

        let (catalog, report) = CatalogLoader::default().load_text(&text);
        assert_eq!(report.rows, 300);
        assert_eq!(report.rejected, 0);
        assert_eq!(catalog.len() + report.duplicates_removed, 300);
        assert!(catalog.iter().all(|s| s.name.starts_with("SYN ")));
    }
}
