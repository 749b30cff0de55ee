//! Feed loading through to map-side helpers: viewport markers, search and
//! the nearest-hazard summary.

use fire_risk_core::{
    assess_all, available_countries, filter_by_country, find_nearest, load_hazard_feed,
    rank_by_risk, search_extent, Coordinate, GeoBounds, MarkerPlan, RiskLevel,
};
use std::fs;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const FEED: &str = r#"[
    {"_id": "ca-1", "location": [-121.60, 39.76], "temperature": 45.0, "humidity": 14,
     "wind_speed": "18 m/s", "wind_gust": 15, "wind_direction": 45, "rain": 0, "clouds": 0,
     "country": "United States", "state": "California", "locationName": "Paradise"},
    {"_id": "ca-2", "location": [-120.90, 38.90], "temperature": 30.0, "humidity": 30,
     "wind_speed": 4.0, "clouds": 20, "country": "United States", "state": "California"},
    {"_id": "bc-1", "location": [-120.34, 50.67], "temperature": 28.0, "humidity": 35,
     "wind_speed": 6.0, "clouds": 50, "country": "Canada", "state": "British Columbia"},
    {"_id": "bad-1", "location": [-300.0, 40.0], "country": "United States"},
    {"_id": "bad-2", "location": "nowhere"},
    {"_id": "au-1", "location": [146.0, -37.5], "temperature": 42.0, "humidity": 8,
     "wind_speed": 18.0, "clouds": 0, "country": "Australia", "state": "Victoria"}
]"#;

fn write_feed(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, FEED).unwrap();
    path
}

#[test]
fn test_feed_to_nearest_summary() {
    let path = write_feed("fire_risk_feed_nearest.json");
    let hazards = load_hazard_feed(&path).unwrap();
    assert_eq!(hazards.len(), 6);

    // Observer in Chico, a few km from the Paradise fire
    let observer = Coordinate::new(-121.84, 39.73).unwrap();
    let nearest = find_nearest(observer, &hazards).unwrap();
    assert_eq!(nearest.hazard.id.as_deref(), Some("ca-1"));
    assert_eq!(nearest.hazard.wind_speed, Some(18.0));
    assert!(*nearest.distance < 25.0);
    assert_eq!(nearest.level(), RiskLevel::High);

    let _ = fs::remove_file(path);
}

#[test]
fn test_feed_ranking() {
    let path = write_feed("fire_risk_feed_ranking.json");
    let hazards = load_hazard_feed(&path).unwrap();

    let observer = Coordinate::new(-121.84, 39.73).unwrap();
    let mut assessments = assess_all(observer, &hazards);
    assert_eq!(assessments.len(), 4);

    rank_by_risk(&mut assessments);
    assert_eq!(assessments[0].hazard.id.as_deref(), Some("ca-1"));
    assert!(assessments
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));

    let _ = fs::remove_file(path);
}

#[test]
fn test_viewport_and_search() {
    let path = write_feed("fire_risk_feed_viewport.json");
    let hazards = load_hazard_feed(&path).unwrap();

    let west_coast: GeoBounds = "-125,32,-114,42".parse().unwrap();
    let plan = MarkerPlan::with_default_batches(&hazards, &west_coast);
    let ids: Vec<_> = plan
        .placements()
        .iter()
        .filter_map(|p| hazards[p.index].id.as_deref())
        .collect();
    assert_eq!(ids, vec!["ca-1", "ca-2"]);

    assert_eq!(
        available_countries(&hazards),
        vec!["Australia", "Canada", "United States"]
    );

    let us = filter_by_country(&hazards, "united");
    assert_eq!(us.len(), 3);
    let extent = search_extent(us).unwrap();
    assert!(extent.contains(Coordinate::new(-121.0, 39.0).unwrap()));
    assert!(!extent.contains(Coordinate::new(-120.34, 50.67).unwrap()));

    let _ = fs::remove_file(path);
}
