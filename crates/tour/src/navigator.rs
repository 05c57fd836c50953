use std::sync::Arc;

use tracing::debug;

use crate::stop::{TourConfig, TourStop};

/// Current position within a tour.
///
/// Transitions are bounds-checked: a request outside `0..stop_count` is
/// dropped without error and without clamping. Every accepted move to a
/// different stop bumps [`Navigator::revision`], which observers compare to
/// detect a change.
#[derive(Debug, Clone)]
pub struct Navigator {
    tour: Arc<TourConfig>,
    current: usize,
    revision: u64,
}

impl Navigator {
    pub fn new(tour: Arc<TourConfig>) -> Self {
        Self {
            tour,
            current: 0,
            revision: 0,
        }
    }

    /// Jump to `index`. Returns whether the request was in range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.tour.len() {
            debug!(index, stops = self.tour.len(), "ignoring out-of-range stop");
            return false;
        }
        if index != self.current {
            debug!(from = self.current, to = index, "tour stop changed");
            self.current = index;
            self.revision += 1;
        }
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_stop(&self) -> &TourStop {
        &self.tour.stops()[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.tour.len()
    }

    pub fn stop_count(&self) -> usize {
        self.tour.len()
    }

    pub fn stops(&self) -> &[TourStop] {
        self.tour.stops()
    }

    pub fn tour(&self) -> &Arc<TourConfig> {
        &self.tour
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Navigator;
    use crate::stop::TourConfig;

    fn navigator() -> Navigator {
        Navigator::new(Arc::new(TourConfig::default()))
    }

    #[test]
    fn starts_at_first_stop() {
        let nav = navigator();
        assert_eq!(nav.current_index(), 0);
        assert!(nav.is_first());
        assert!(!nav.is_last());
        assert_eq!(nav.current_stop().name, "Highway Exit");
    }

    #[test]
    fn go_to_accepts_every_valid_index() {
        let mut nav = navigator();
        for i in 0..nav.stop_count() {
            assert!(nav.go_to(i));
            assert_eq!(nav.current_index(), i);
            assert_eq!(nav.current_stop(), &nav.stops()[i]);
        }
    }

    #[test]
    fn go_to_ignores_out_of_range() {
        let mut nav = navigator();
        nav.go_to(2);
        for i in [4, 5, 100, usize::MAX] {
            assert!(!nav.go_to(i));
            assert_eq!(nav.current_index(), 2);
        }
    }

    #[test]
    fn previous_at_first_is_noop() {
        let mut nav = navigator();
        assert!(!nav.previous());
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.revision(), 0);
    }

    #[test]
    fn next_at_last_is_noop() {
        let mut nav = navigator();
        nav.go_to(3);
        let rev = nav.revision();
        assert!(!nav.next());
        assert_eq!(nav.current_index(), 3);
        assert_eq!(nav.revision(), rev);
    }

    #[test]
    fn first_and_last_flags_follow_index() {
        let mut nav = navigator();
        for i in 0..nav.stop_count() {
            nav.go_to(i);
            assert_eq!(nav.is_first(), i == 0);
            assert_eq!(nav.is_last(), i == nav.stop_count() - 1);
        }
    }

    #[test]
    fn revision_counts_real_changes_only() {
        let mut nav = navigator();
        nav.next();
        nav.next();
        nav.go_to(2);
        nav.previous();
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.revision(), 3);
    }

    #[test]
    fn single_stop_tour_is_first_and_last() {
        let tour = TourConfig::new(vec![TourConfig::default().stops()[3].clone()]).unwrap();
        let mut nav = Navigator::new(Arc::new(tour));
        assert!(nav.is_first() && nav.is_last());
        assert!(!nav.next());
        assert!(!nav.previous());
    }
}
