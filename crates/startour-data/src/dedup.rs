//! Adjacent proximity filter over a distance-sorted list

use crate::stars::StarRecord;

/// Collapse stars that sit within `threshold` of their immediate predecessor.
///
/// Each survivor is compared only with the entry that follows it. When that
/// entry is too close it is removed and the survivor is tested against the new
/// successor, so a run of near-duplicates collapses onto its first member.
/// Near-duplicates that are not adjacent in distance order are left alone.
///
/// Returns the number of removed stars.
pub fn dedup_adjacent(stars: &mut Vec<StarRecord>, threshold: f64) -> usize {
    let before = stars.len();
    // `dedup_by` hands us (candidate, last survivor) and drops the candidate on `true`
    stars.dedup_by(|candidate, survivor| {
        candidate.position.distance_to(&survivor.position) < threshold
    });
    before - stars.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use startour_core::CatalogPosition;

    fn at(name: &str, x: f64, y: f64, z: f64) -> StarRecord {
        let pos = CatalogPosition::new(x, y, z);
        StarRecord::new(name, pos, pos.magnitude(), 0.5)
    }

    fn names(stars: &[StarRecord]) -> Vec<&str> {
        stars.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_removes_close_successor() {
        let mut stars = vec![at("a", 10.0, 0.0, 0.0), at("b", 13.0, 0.0, 0.0), at("c", 20.0, 0.0, 0.0)];
        assert_eq!(dedup_adjacent(&mut stars, 5.0), 1);
        assert_eq!(names(&stars), ["a", "c"]);
    }

    #[test]
    fn test_run_collapses_onto_first() {
        // b and c are both within 5 of a, d is 6 away from a
        let mut stars = vec![
            at("a", 10.0, 0.0, 0.0),
            at("b", 11.0, 0.0, 0.0),
            at("c", 14.0, 0.0, 0.0),
            at("d", 16.0, 0.0, 0.0),
        ];
        assert_eq!(dedup_adjacent(&mut stars, 5.0), 2);
        assert_eq!(names(&stars), ["a", "d"]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut stars = vec![at("a", 10.0, 0.0, 0.0), at("b", 15.0, 0.0, 0.0)];
        assert_eq!(dedup_adjacent(&mut stars, 5.0), 0);
        assert_eq!(stars.len(), 2);
    }

    #[test]
    fn test_non_adjacent_duplicates_survive() {
        // a and c coincide but b (same distance band, opposite side) separates them
        let mut stars = vec![
            at("a", 10.0, 0.0, 0.0),
            at("b", -10.0, 0.0, 0.0),
            at("c", 10.0, 0.5, 0.0),
        ];
        assert_eq!(dedup_adjacent(&mut stars, 5.0), 0);
        assert_eq!(names(&stars), ["a", "b", "c"]);
    }

    #[test]
    fn test_adjacent_survivors_are_separated() {
        let mut stars: Vec<_> = (0..200)
            .map(|i| {
                let d = i as f64 * 1.7;
                at(&format!("s{i}"), d, (i % 3) as f64, 0.0)
            })
            .collect();
        dedup_adjacent(&mut stars, 5.0);

        for pair in stars.windows(2) {
            assert!(pair[0].position.distance_to(&pair[1].position) >= 5.0);
        }
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<StarRecord> = Vec::new();
        assert_eq!(dedup_adjacent(&mut empty, 5.0), 0);

        let mut single = vec![at("only", 1.0, 1.0, 1.0)];
        assert_eq!(dedup_adjacent(&mut single, 5.0), 0);
        assert_eq!(single.len(), 1);
    }
}
