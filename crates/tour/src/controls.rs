use crate::navigator::Navigator;

/// One selector dot under the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopDot {
    pub index: usize,
    pub title: String,
    pub active: bool,
}

/// State of the navigation controls, derived from a [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavControls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// "Stop 2 of 4".
    pub caption: String,
    pub current_name: String,
    pub dots: Vec<StopDot>,
}

impl NavControls {
    pub fn from_navigator(nav: &Navigator) -> Self {
        let current = nav.current_index();
        Self {
            previous_enabled: !nav.is_first(),
            next_enabled: !nav.is_last(),
            caption: format!("Stop {} of {}", current + 1, nav.stop_count()),
            current_name: nav.current_stop().name.clone(),
            dots: nav
                .stops()
                .iter()
                .enumerate()
                .map(|(index, stop)| StopDot {
                    index,
                    title: stop.name.clone(),
                    active: index == current,
                })
                .collect(),
        }
    }
}
