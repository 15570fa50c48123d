use geo::{BoundingRect, LineString, Polygon, coord};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned bounding rectangle in map coordinates, ordered
/// `[min_x, min_y, max_x, max_y]` (the extent convention of the map view).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// JSON array form, as sent in the `bbox` query parameter.
    pub fn to_json_array(&self) -> String {
        serde_json::json!([self.min_x, self.min_y, self.max_x, self.max_y]).to_string()
    }
}

/// A single drawn field boundary, in display coordinates (EPSG:4326).
///
/// The extent is computed once at construction; geometries with no
/// coordinates are rejected up front so later pairing with an imagery
/// overlay cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    polygon: Polygon<f64>,
    extent: Extent,
}

impl Feature {
    pub fn new(polygon: Polygon<f64>) -> Result<Self> {
        let rect = polygon
            .bounding_rect()
            .ok_or_else(|| Error::Geometry("polygon has no coordinates".into()))?;
        let extent = Extent {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        };
        Ok(Self { polygon, extent })
    }

    /// Build from an exterior ring of `[x, y]` positions, the shape a
    /// completed draw interaction hands over.
    pub fn from_ring(ring: &[[f64; 2]]) -> Result<Self> {
        let exterior: LineString<f64> = ring.iter().map(|&[x, y]| coord! { x: x, y: y }).collect();
        Self::new(Polygon::new(exterior, vec![]))
    }

    /// Parse a GeoJSON string (a bare geometry or a single feature) into a
    /// polygon feature.
    pub fn from_geojson(s: &str) -> Result<Self> {
        let gj: GeoJson = s
            .parse()
            .map_err(|e: geojson::Error| Error::Geometry(e.to_string()))?;
        let geometry = match gj {
            GeoJson::Geometry(g) => g,
            GeoJson::Feature(f) => f
                .geometry
                .ok_or_else(|| Error::Geometry("feature has no geometry".into()))?,
            GeoJson::FeatureCollection(_) => {
                return Err(Error::Geometry(
                    "expected a single geometry or feature, got a collection".into(),
                ));
            }
        };
        let polygon = Polygon::<f64>::try_from(geometry.value)
            .map_err(|e| Error::Geometry(e.to_string()))?;
        Self::new(polygon)
    }

    /// Interchange form: the GeoJSON geometry sub-object only, exactly what
    /// goes on the wire in the `polygon` query parameter.
    pub fn geometry_json(&self) -> String {
        let geometry = geojson::Geometry::new(geojson::Value::from(&self.polygon));
        serde_json::to_string(&geometry).expect("polygon geometry serializes to JSON")
    }

    /// Extent of the polygon, captured at construction.
    pub fn extent(&self) -> Extent {
        self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Feature {
        Feature::from_ring(&[
            [70.91, 21.01],
            [70.91, 20.99],
            [70.92, 20.99],
            [70.91, 21.01],
        ])
        .unwrap()
    }

    #[test]
    fn extent_spans_all_ring_coordinates() {
        let e = triangle().extent();
        assert_eq!(e.min_x, 70.91);
        assert_eq!(e.max_x, 70.92);
        assert_eq!(e.min_y, 20.99);
        assert_eq!(e.max_y, 21.01);
    }

    #[test]
    fn extent_serializes_as_flat_array() {
        let e = triangle().extent();
        assert_eq!(e.to_json_array(), "[70.91,20.99,70.92,21.01]");
    }

    #[test]
    fn geometry_json_is_a_bare_geometry_object() {
        let v: serde_json::Value = serde_json::from_str(&triangle().geometry_json()).unwrap();
        assert_eq!(v["type"], "Polygon");
        assert!(v["coordinates"].is_array());
        assert!(v.get("properties").is_none());
    }

    #[test]
    fn parses_bare_geometry_and_feature_wrappers() {
        let geom = r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]]}"#;
        let feat = format!(r#"{{"type":"Feature","properties":{{}},"geometry":{geom}}}"#);
        assert_eq!(
            Feature::from_geojson(geom).unwrap().extent(),
            Feature::from_geojson(&feat).unwrap().extent()
        );
    }

    #[test]
    fn rejects_non_polygon_geometry() {
        let err = Feature::from_geojson(r#"{"type":"Point","coordinates":[1.0,2.0]}"#).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }
}
