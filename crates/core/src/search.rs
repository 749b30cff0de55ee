//! Country search over a hazard feed

use rustc_hash::FxHashSet;

use crate::core_types::hazard::non_blank;
use crate::core_types::HazardRecord;
use crate::geo::GeoBounds;

/// Hazards whose country contains `query`, ignoring case.
///
/// A blank query matches everything; records without a country never match a
/// non-blank query.
pub fn filter_by_country<'a>(hazards: &'a [HazardRecord], query: &str) -> Vec<&'a HazardRecord> {
    let query = query.trim();
    if query.is_empty() {
        return hazards.iter().collect();
    }

    let needle = query.to_lowercase();
    hazards
        .iter()
        .filter(|h| {
            h.country
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Distinct non-blank countries in the feed, trimmed and sorted
pub fn available_countries(hazards: &[HazardRecord]) -> Vec<String> {
    let unique: FxHashSet<&str> = hazards
        .iter()
        .filter_map(|h| non_blank(h.country.as_deref()))
        .map(str::trim)
        .collect();

    let mut countries: Vec<String> = unique.into_iter().map(str::to_string).collect();
    countries.sort_unstable();
    countries
}

/// Bounds enclosing every valid location in `hazards`, for fitting the map
/// to a set of search results. `None` when nothing has a valid location.
pub fn search_extent<'a, I>(hazards: I) -> Option<GeoBounds>
where
    I: IntoIterator<Item = &'a HazardRecord>,
{
    GeoBounds::from_coordinates(hazards.into_iter().filter_map(|h| h.coordinate().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Vec<HazardRecord> {
        vec![
            HazardRecord::at(150.0, -33.0).with_country("Australia"),
            HazardRecord::at(-120.0, 38.0).with_country("United States"),
            HazardRecord::at(145.0, -37.0).with_country("Australia"),
            HazardRecord::at(-100.0, 55.0).with_country("Canada"),
            HazardRecord::at(10.0, 10.0),
            HazardRecord::at(-3.0, 40.0).with_country(""),
            HazardRecord::at(-4.0, 41.0).with_country("   "),
            HazardRecord::at(-100.0, 50.0).with_country(" Canada "),
        ]
    }

    #[test]
    fn test_blank_query_returns_everything() {
        let feed = feed();
        assert_eq!(filter_by_country(&feed, "").len(), feed.len());
        assert_eq!(filter_by_country(&feed, "   ").len(), feed.len());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let feed = feed();
        assert_eq!(filter_by_country(&feed, "aus").len(), 2);
        assert_eq!(filter_by_country(&feed, "  STATES ").len(), 1);
        assert_eq!(filter_by_country(&feed, "canada").len(), 2);
        assert!(filter_by_country(&feed, "brazil").is_empty());
    }

    #[test]
    fn test_available_countries() {
        assert_eq!(
            available_countries(&feed()),
            vec!["Australia", "Canada", "United States"]
        );
    }

    #[test]
    fn test_search_extent() {
        let feed = feed();
        let matches = filter_by_country(&feed, "australia");
        let bounds = search_extent(matches).unwrap();
        assert_eq!(bounds.west(), 145.0);
        assert_eq!(bounds.east(), 150.0);
        assert_eq!(bounds.south(), -37.0);
        assert_eq!(bounds.north(), -33.0);

        assert!(search_extent(&[HazardRecord::default()]).is_none());
    }
}
