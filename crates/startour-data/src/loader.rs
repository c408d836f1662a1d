//! Catalog loading: fetch, parse every row, sort, deduplicate

use crate::dedup::dedup_adjacent;
use crate::error::CatalogResult;
use crate::parser::{parse_row, ColumnLayout};
use crate::source::CatalogSource;
use crate::stars::{sort_by_distance, StarCatalog, StarRecord};
use serde::Serialize;
use startour_core::constants::PROXIMITY_THRESHOLD;

/// Stars parsed from raw text, in file order
#[derive(Clone, Debug, Default)]
pub struct ParseOutcome {
    pub stars: Vec<StarRecord>,
    /// Data rows seen (header excluded)
    pub rows: usize,
    /// Rows dropped by the parser
    pub rejected: usize,
}

/// Summary of one load
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows: usize,
    pub parsed: usize,
    pub rejected: usize,
    pub duplicates_removed: usize,
    pub kept: usize,
}

/// Parse catalog text. Line 0 is the header and is never parsed.
pub fn parse_catalog_text(text: &str, layout: &ColumnLayout) -> ParseOutcome {
    let mut rows = 0;
    let stars: Vec<StarRecord> = text
        .lines()
        .enumerate()
        .skip(1)
        .inspect(|_| rows += 1)
        .filter_map(|(line_no, line)| match parse_row(line, layout) {
            Ok(star) => Some(star),
            Err(err) => {
                tracing::trace!(line = line_no + 1, %err, "Dropping row");
                None
            }
        })
        .collect();

    let rejected = rows - stars.len();
    ParseOutcome { stars, rows, rejected }
}

/// Loads a catalog source into a sorted, deduplicated catalog
#[derive(Clone, Debug)]
pub struct CatalogLoader {
    layout: ColumnLayout,
    proximity_threshold: f64,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(ColumnLayout::hyg_v3(), PROXIMITY_THRESHOLD)
    }
}

impl CatalogLoader {
    pub fn new(layout: ColumnLayout, proximity_threshold: f64) -> Self {
        Self { layout, proximity_threshold }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn load(&self, source: &dyn CatalogSource) -> CatalogResult<StarCatalog> {
        self.load_with_report(source).map(|(catalog, _)| catalog)
    }

    /// Fetch the source once and build the catalog. Fetch failures propagate.
    pub fn load_with_report(&self, source: &dyn CatalogSource) -> CatalogResult<(StarCatalog, LoadReport)> {
        tracing::info!("Loading star catalog from {}", source.location());
        let text = source.fetch_text()?;
        Ok(self.load_text(&text))
    }

    /// Build the catalog from text already in memory
    pub fn load_text(&self, text: &str) -> (StarCatalog, LoadReport) {
        let ParseOutcome { mut stars, rows, rejected } = parse_catalog_text(text, &self.layout);
        let parsed = stars.len();

        if rows > 0 && parsed == 0 {
            tracing::warn!("All {} rows were rejected; check the column layout", rows);
        }

        // Dedup relies on distance-sorted adjacency
        sort_by_distance(&mut stars);
        let duplicates_removed = dedup_adjacent(&mut stars, self.proximity_threshold);
        tracing::debug!("Removed {} near-duplicate stars", duplicates_removed);

        let report = LoadReport {
            rows,
            parsed,
            rejected,
            duplicates_removed,
            kept: stars.len(),
        };
        tracing::info!(
            "Loaded {} stars ({} rows, {} rejected, {} near-duplicates)",
            report.kept, report.rows, report.rejected, report.duplicates_removed
        );

        (StarCatalog::from_records(stars), report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CatalogError, FetchError};
    use crate::source::{FileSource, StaticSource};

    const HEADER: &str = "id,hip,hd,hr,gl,bf,proper,ra,dec,dist,pmra,pmdec,rv,mag,absmag,spect,ci,x,y,z";

    fn row(name: &str, dist: &str, ci: &str, x: f64, y: f64, z: f64) -> String {
        format!("0,,,,,,{name},0.0,0.0,{dist},0,0,0,0,0,G2V,{ci},{x},{y},{z}")
    }

    fn catalog_text(rows: &[String]) -> String {
        let mut text = String::from(HEADER);
        for r in rows {
            text.push('\n');
            text.push_str(r);
        }
        text.push('\n');
        text
    }

    #[test]
    fn test_header_is_never_parsed() {
        // A header that happens to look like data must still be skipped
        let text = format!("{}\n{}", row("H", "1.0", "0.1", 1.0, 0.0, 0.0), row("D", "20.0", "0.1", 20.0, 0.0, 0.0));
        let outcome = parse_catalog_text(&text, &ColumnLayout::hyg_v3());
        assert_eq!(outcome.rows, 1);
        assert_eq!(outcome.stars.len(), 1);
        assert_eq!(outcome.stars[0].name, "D");
    }

    #[test]
    fn test_parse_keeps_file_order_and_counts_rejects() {
        let text = catalog_text(&[
            row("far", "50.0", "0.1", 50.0, 0.0, 0.0),
            row("bad", "oops", "0.1", 1.0, 0.0, 0.0),
            row("near", "10.0", "0.1", 10.0, 0.0, 0.0),
            String::new(),
            row("noci", "30.0", "", 30.0, 0.0, 0.0),
        ]);
        let outcome = parse_catalog_text(&text, &ColumnLayout::hyg_v3());

        assert_eq!(outcome.rows, 5);
        assert_eq!(outcome.rejected, 3);
        let names: Vec<_> = outcome.stars.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["far", "near"]);
    }

    #[test]
    fn test_load_sorts_and_dedups() {
        let text = catalog_text(&[
            row("c", "30.0", "0.5", 30.0, 0.0, 0.0),
            row("a", "10.0", "-0.5", 10.0, 0.0, 0.0),
            row("a-twin", "12.0", "-0.5", 12.0, 0.0, 0.0),
            row("b", "20.0", "0.0", 20.0, 0.0, 0.0),
        ]);
        let (catalog, report) = CatalogLoader::default().load_text(&text);

        let names: Vec<_> = catalog.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(
            report,
            LoadReport { rows: 4, parsed: 4, rejected: 0, duplicates_removed: 1, kept: 3 }
        );
    }

    #[test]
    fn test_malformed_distance_is_excluded_not_zeroed() {
        let text = catalog_text(&[
            row("good", "10.0", "0.1", 10.0, 0.0, 0.0),
            row("bad", "n/a", "0.1", 0.0, 0.0, 0.0),
        ]);
        let (catalog, _) = CatalogLoader::default().load_text(&text);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.iter().all(|s| s.name != "bad"));
        assert!(catalog.iter().all(|s| s.distance != 0.0));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = catalog_text(&[row("a", "10.0", "0.1", 10.0, 0.0, 0.0)]).replace('\n', "\r\n");
        let (catalog, report) = CatalogLoader::default().load_text(&text);
        assert_eq!(report.rejected, 0);
        assert_eq!(catalog.as_slice()[0].position.z, 0.0);
    }

    #[test]
    fn test_load_from_source() {
        let text = catalog_text(&[row("a", "10.0", "0.1", 10.0, 0.0, 0.0)]);
        let catalog = CatalogLoader::default().load(&StaticSource::new("inline", text)).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.csv"));
        let err = CatalogLoader::default().load(&source).unwrap_err();
        assert!(matches!(err, CatalogError::Fetch(FetchError::Io { .. })));
    }

    #[test]
    fn test_empty_text() {
        let (catalog, report) = CatalogLoader::default().load_text("");
        assert!(catalog.is_empty());
        assert_eq!(report, LoadReport::default());
    }
}
