//! Per-flow query construction from the current selection.
//!
//! Each builder encodes the selected polygon's geometry sub-object to its
//! GeoJSON interchange form and attaches the flow-specific inputs verbatim.
//! Date strings and index identifiers are forwarded as-is; the service is
//! the validator.

use crate::error::Result;
use crate::geometry::Extent;
use crate::selection::SelectionStore;

/// Parameters for the `/dates/` lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DatesQuery {
    pub polygon: String,
}

/// Parameters for the `/ndvi-stats/` lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsQuery {
    pub polygon: String,
    pub start_date: String,
    pub end_date: String,
}

/// Parameters for the `/imagery/` lookup. Carries the extent the bbox was
/// derived from so the resulting overlay pairs with the geometry that was
/// current when the query was built.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageryQuery {
    pub bbox: String,
    pub polygon: String,
    pub index: String,
    pub date: String,
    pub extent: Extent,
}

pub fn dates_query(store: &SelectionStore) -> Result<DatesQuery> {
    let feature = store.current()?;
    Ok(DatesQuery {
        polygon: feature.geometry_json(),
    })
}

pub fn stats_query(store: &SelectionStore, start_date: &str, end_date: &str) -> Result<StatsQuery> {
    let feature = store.current()?;
    Ok(StatsQuery {
        polygon: feature.geometry_json(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
    })
}

pub fn imagery_query(store: &SelectionStore, index: &str, date: &str) -> Result<ImageryQuery> {
    let feature = store.current()?;
    let extent = feature.extent();
    Ok(ImageryQuery {
        bbox: extent.to_json_array(),
        polygon: feature.geometry_json(),
        index: index.to_string(),
        date: date.to_string(),
        extent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geometry::Feature;

    fn selected() -> SelectionStore {
        let mut store = SelectionStore::new();
        store.finish_draw(
            Feature::from_ring(&[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 0.0]]).unwrap(),
        );
        store
    }

    #[test]
    fn builders_fail_without_a_selection() {
        let store = SelectionStore::new();
        assert!(matches!(dates_query(&store), Err(Error::NoSelection)));
        assert!(matches!(
            stats_query(&store, "2023-01-01", "2023-02-01"),
            Err(Error::NoSelection)
        ));
        assert!(matches!(
            imagery_query(&store, "ndvi", "2023-10-07"),
            Err(Error::NoSelection)
        ));
    }

    #[test]
    fn polygon_param_is_the_geometry_sub_object() {
        let q = dates_query(&selected()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&q.polygon).unwrap();
        assert_eq!(v["type"], "Polygon");
    }

    #[test]
    fn date_inputs_are_forwarded_unvalidated() {
        let q = stats_query(&selected(), "not-a-date", "").unwrap();
        assert_eq!(q.start_date, "not-a-date");
        assert_eq!(q.end_date, "");
    }

    #[test]
    fn imagery_query_captures_bbox_and_extent_together() {
        let q = imagery_query(&selected(), "smi", "2023-10-01").unwrap();
        assert_eq!(q.bbox, q.extent.to_json_array());
        assert_eq!(q.bbox, "[0.0,0.0,2.0,1.0]");
    }
}
