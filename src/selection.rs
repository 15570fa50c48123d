use crate::error::{Error, Result};
use crate::geometry::Feature;

/// Single-slot store for the drawn field boundary.
///
/// At most one feature exists at any time: starting a new draw clears the
/// slot unconditionally, and finishing a draw installs the completed polygon.
#[derive(Debug, Default)]
pub struct SelectionStore {
    feature: Option<Feature>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw-start hook: discard whatever is selected, with no confirmation.
    pub fn begin_draw(&mut self) {
        self.feature = None;
    }

    /// Draw-end hook: the completed polygon becomes the selection.
    pub fn finish_draw(&mut self, feature: Feature) {
        self.feature = Some(feature);
    }

    /// The currently selected feature, or `NoSelection` when nothing has
    /// been drawn (or a draw is in progress).
    pub fn current(&self) -> Result<&Feature> {
        self.feature.as_ref().ok_or(Error::NoSelection)
    }

    pub fn is_empty(&self) -> bool {
        self.feature.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Feature {
        Feature::from_ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]).unwrap()
    }

    #[test]
    fn empty_store_reports_no_selection() {
        let store = SelectionStore::new();
        assert!(matches!(store.current(), Err(Error::NoSelection)));
    }

    #[test]
    fn finished_draw_becomes_current() {
        let mut store = SelectionStore::new();
        store.finish_draw(square());
        assert!(store.current().is_ok());
    }

    #[test]
    fn begin_draw_clears_regardless_of_prior_contents() {
        let mut store = SelectionStore::new();

        // Idempotent on an already-empty store.
        store.begin_draw();
        assert!(store.is_empty());

        store.finish_draw(square());
        store.begin_draw();
        assert!(matches!(store.current(), Err(Error::NoSelection)));

        // And again, still empty.
        store.begin_draw();
        assert!(store.is_empty());
    }

    #[test]
    fn new_draw_replaces_old_feature() {
        let mut store = SelectionStore::new();
        store.finish_draw(square());
        store.begin_draw();
        let other =
            Feature::from_ring(&[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]).unwrap();
        store.finish_draw(other.clone());
        assert_eq!(store.current().unwrap(), &other);
    }
}
