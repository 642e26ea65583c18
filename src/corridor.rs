use crate::config::CorridorConfig;
use crate::error::{AppError, Result};
use crate::models::Direction;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// A milepost reference point along the corridor
#[derive(Debug, Clone, Serialize)]
pub struct Milepost {
    pub mile: f64,
    pub lat: f64,
    pub lon: f64,
    pub direction: Option<Direction>,
}

/// Corridor reference geometry: ordered mileposts plus the centerline
/// polylines clients draw the map with
#[derive(Debug)]
pub struct CorridorMap {
    mileposts: Vec<Milepost>,
    polylines: Vec<Vec<[f64; 2]>>,
}

/// Normalize a raw direction field to a travel direction
///
/// Source data mixes N/S with increasing/decreasing and ahead/back
/// indicators.
pub fn normalize_direction(value: &str) -> Option<Direction> {
    let v = value.trim().to_lowercase();
    if v.starts_with('n') {
        return Some(Direction::Northbound);
    }
    if v.starts_with('s') {
        return Some(Direction::Southbound);
    }
    match v.as_str() {
        "i" => Some(Direction::Northbound), // increasing = northbound
        "d" => Some(Direction::Southbound), // decreasing = southbound
        "a" => Some(Direction::Northbound), // ahead
        "b" => Some(Direction::Southbound), // back
        _ => None,
    }
}

// GeoJSON fragments we care about; everything else is ignored.

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: serde_json::Value,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: serde_json::Value,
}

fn numeric_prop(props: &serde_json::Value, key: &str) -> Option<f64> {
    match props.get(key)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl CorridorMap {
    /// Load milepost and centerline reference data
    ///
    /// Mileposts are required; the centerline is display-only, so a missing
    /// or unreadable file degrades to an empty geometry with a warning.
    pub fn load(config: &CorridorConfig) -> Result<Self> {
        let mileposts = load_mileposts(&config.milepost_path)?;

        let polylines = match load_polylines(&config.corridor_path) {
            Ok(lines) => lines,
            Err(e) => {
                warn!(
                    path = %config.corridor_path.display(),
                    error = %e,
                    "Corridor centerline unavailable; map geometry will be empty"
                );
                Vec::new()
            }
        };

        info!(
            mileposts = mileposts.len(),
            polylines = polylines.len(),
            "Corridor reference data loaded"
        );

        Ok(Self {
            mileposts,
            polylines,
        })
    }

    #[cfg(test)]
    fn from_parts(mileposts: Vec<Milepost>, polylines: Vec<Vec<[f64; 2]>>) -> Self {
        let mut mileposts = mileposts;
        mileposts.sort_by(|a, b| a.mile.total_cmp(&b.mile));
        Self {
            mileposts,
            polylines,
        }
    }

    pub fn mileposts(&self) -> &[Milepost] {
        &self.mileposts
    }

    pub fn polylines(&self) -> &[Vec<[f64; 2]>] {
        &self.polylines
    }

    /// Convert a normalized corridor position (0-1) to coordinates
    pub fn coordinates_from_normalized(&self, normalized: f64) -> (f64, f64) {
        let post = self.post_at_normalized(normalized);
        (post.lat, post.lon)
    }

    /// Approximate milepost number for a normalized corridor position
    pub fn approx_milepost(&self, normalized: f64) -> f64 {
        self.post_at_normalized(normalized).mile
    }

    /// Find the milepost nearest to a given mile value
    pub fn nearest_milepost(&self, mile: f64) -> Option<&Milepost> {
        self.mileposts
            .iter()
            .min_by(|a, b| (a.mile - mile).abs().total_cmp(&(b.mile - mile).abs()))
    }

    fn post_at_normalized(&self, normalized: f64) -> &Milepost {
        // Index into the mile-sorted posts; the fraction is truncated, same
        // as the historical behavior.
        let idx = (normalized * (self.mileposts.len() - 1) as f64) as usize;
        let idx = idx.min(self.mileposts.len() - 1);
        &self.mileposts[idx]
    }
}

fn load_mileposts(path: &Path) -> Result<Vec<Milepost>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!(
            "failed to read milepost data {}: {}",
            path.display(),
            e
        ))
    })?;
    let collection: FeatureCollection = serde_json::from_str(&text).map_err(|e| {
        AppError::Configuration(format!(
            "failed to parse milepost data {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut mileposts: Vec<Milepost> = collection
        .features
        .iter()
        .filter_map(|feature| {
            let mile = numeric_prop(&feature.properties, "SRMP")?;
            let lat = numeric_prop(&feature.properties, "Latitude")?;
            let lon = numeric_prop(&feature.properties, "Longitude")?;
            let direction = feature
                .properties
                .get("Direction")
                .and_then(|v| v.as_str())
                .and_then(normalize_direction);
            Some(Milepost {
                mile,
                lat,
                lon,
                direction,
            })
        })
        .collect();

    if mileposts.is_empty() {
        return Err(AppError::Configuration(format!(
            "milepost data {} contains no usable features",
            path.display()
        )));
    }

    mileposts.sort_by(|a, b| a.mile.total_cmp(&b.mile));
    Ok(mileposts)
}

fn load_polylines(path: &Path) -> Result<Vec<Vec<[f64; 2]>>> {
    let text = std::fs::read_to_string(path)?;
    let collection: FeatureCollection = serde_json::from_str(&text)?;

    let mut polylines = Vec::new();
    for feature in collection.features {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        match geometry.kind.as_str() {
            "LineString" => {
                if let Some(line) = parse_line(&geometry.coordinates) {
                    polylines.push(line);
                }
            }
            "MultiLineString" => {
                if let Some(lines) = geometry.coordinates.as_array() {
                    polylines.extend(lines.iter().filter_map(parse_line));
                }
            }
            _ => {}
        }
    }
    Ok(polylines)
}

fn parse_line(coordinates: &serde_json::Value) -> Option<Vec<[f64; 2]>> {
    let points = coordinates.as_array()?;
    let line: Vec<[f64; 2]> = points
        .iter()
        .filter_map(|point| {
            let point = point.as_array()?;
            // GeoJSON order is [lon, lat]
            Some([point.first()?.as_f64()?, point.get(1)?.as_f64()?])
        })
        .collect();
    (!line.is_empty()).then_some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts() -> Vec<Milepost> {
        (0..=10)
            .map(|i| Milepost {
                mile: (i * 10) as f64,
                lat: 47.0 + i as f64 * 0.1,
                lon: -122.3 - i as f64 * 0.01,
                direction: Some(Direction::Northbound),
            })
            .collect()
    }

    #[test]
    fn test_normalize_direction_variants() {
        assert_eq!(normalize_direction("NB"), Some(Direction::Northbound));
        assert_eq!(normalize_direction("southbound"), Some(Direction::Southbound));
        assert_eq!(normalize_direction("i"), Some(Direction::Northbound));
        assert_eq!(normalize_direction("d"), Some(Direction::Southbound));
        assert_eq!(normalize_direction("a"), Some(Direction::Northbound));
        assert_eq!(normalize_direction("b"), Some(Direction::Southbound));
        assert_eq!(normalize_direction("x"), None);
    }

    #[test]
    fn test_normalized_position_endpoints() {
        let map = CorridorMap::from_parts(posts(), vec![]);

        assert_eq!(map.approx_milepost(0.0), 0.0);
        assert_eq!(map.approx_milepost(1.0), 100.0);

        let (lat, _) = map.coordinates_from_normalized(0.0);
        assert_eq!(lat, 47.0);
    }

    #[test]
    fn test_normalized_position_truncates() {
        let map = CorridorMap::from_parts(posts(), vec![]);
        // 0.55 * 10 = 5.5 -> index 5
        assert_eq!(map.approx_milepost(0.55), 50.0);
    }

    #[test]
    fn test_nearest_milepost() {
        let map = CorridorMap::from_parts(posts(), vec![]);
        assert_eq!(map.nearest_milepost(43.0).unwrap().mile, 40.0);
        assert_eq!(map.nearest_milepost(46.0).unwrap().mile, 50.0);
        assert_eq!(map.nearest_milepost(500.0).unwrap().mile, 100.0);
    }

    #[test]
    fn test_load_mileposts_from_geojson() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mileposts.geojson");
        std::fs::write(
            &path,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"SRMP": 12.0, "Latitude": 47.1, "Longitude": -122.3, "Direction": "i"}, "geometry": null},
                    {"type": "Feature", "properties": {"SRMP": "4.0", "Latitude": 47.0, "Longitude": -122.2, "Direction": "SB"}, "geometry": null},
                    {"type": "Feature", "properties": {"Latitude": 47.2}, "geometry": null}
                ]
            }"#,
        )
        .unwrap();

        let mileposts = load_mileposts(&path).unwrap();
        // the feature without SRMP/Longitude is dropped, the rest sorted
        assert_eq!(mileposts.len(), 2);
        assert_eq!(mileposts[0].mile, 4.0);
        assert_eq!(mileposts[0].direction, Some(Direction::Southbound));
        assert_eq!(mileposts[1].mile, 12.0);
    }

    #[test]
    fn test_load_polylines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corridor.geojson");
        std::fs::write(
            &path,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[-122.3, 47.0], [-122.31, 47.1]]}},
                    {"type": "Feature", "properties": {}, "geometry": {"type": "MultiLineString", "coordinates": [[[-122.4, 47.2], [-122.41, 47.3]], [[-122.5, 47.4], [-122.51, 47.5]]]}}
                ]
            }"#,
        )
        .unwrap();

        let polylines = load_polylines(&path).unwrap();
        assert_eq!(polylines.len(), 3);
        assert_eq!(polylines[0][0], [-122.3, 47.0]);
    }

    #[test]
    fn test_missing_milepost_file_is_configuration_error() {
        let config = CorridorConfig {
            milepost_path: "/nonexistent/mileposts.geojson".into(),
            corridor_path: "/nonexistent/corridor.geojson".into(),
        };
        let err = CorridorMap::load(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
