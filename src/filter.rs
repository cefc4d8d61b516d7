use crate::env::LayoutEngine;

/// Project-grid filter bar. Holds the `data-filter` tag of every button and
/// which one is currently marked active; the grid collaborator receives the
/// selected tag verbatim.
#[derive(Debug)]
pub struct FilterBar {
    tags: Vec<String>,
    active: Option<usize>,
}

impl FilterBar {
    pub fn new(tags: Vec<String>, active: Option<usize>) -> Self {
        let active = active.filter(|index| *index < tags.len());
        Self { tags, active }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Marks `index` as the single active button and asks the grid to
    /// re-filter with its tag. Out-of-range indexes change nothing.
    pub fn select(&mut self, index: usize, grid: &dyn LayoutEngine) -> Option<&str> {
        let tag = self.tags.get(index)?;
        self.active = Some(index);
        grid.refilter(tag);
        Some(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingGrid {
        filters: RefCell<Vec<String>>,
    }

    impl LayoutEngine for RecordingGrid {
        fn refilter(&self, tag: &str) {
            self.filters.borrow_mut().push(tag.to_string());
        }
    }

    fn bar() -> FilterBar {
        FilterBar::new(
            vec!["*".to_string(), "web".to_string(), "design".to_string()],
            Some(0),
        )
    }

    #[test]
    fn selecting_a_tag_marks_one_button_and_notifies_the_grid() {
        let grid = RecordingGrid::default();
        let mut bar = bar();

        assert_eq!(bar.select(1, &grid), Some("web"));
        assert_eq!(bar.active(), Some(1));
        assert_eq!(grid.filters.borrow().as_slice(), ["web"]);
    }

    #[test]
    fn reselecting_moves_the_single_active_marker() {
        let grid = RecordingGrid::default();
        let mut bar = bar();

        bar.select(1, &grid);
        bar.select(2, &grid);
        assert_eq!(bar.active(), Some(2));
        assert_eq!(grid.filters.borrow().as_slice(), ["web", "design"]);
    }

    #[test]
    fn out_of_range_selection_changes_nothing() {
        let grid = RecordingGrid::default();
        let mut bar = bar();

        assert_eq!(bar.select(9, &grid), None);
        assert_eq!(bar.active(), Some(0));
        assert!(grid.filters.borrow().is_empty());
    }

    #[test]
    fn initial_active_outside_range_is_discarded() {
        let bar = FilterBar::new(vec!["*".to_string()], Some(5));
        assert_eq!(bar.active(), None);
    }
}
