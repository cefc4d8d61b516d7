//! The single page-session state struct. Built once at startup and driven
//! by the event wiring; replaces the pile of module-level flags a script
//! like this usually accumulates.

use crate::animate::{self, OneShot};
use crate::env::{ElementMetrics, Viewport};
use crate::filter::FilterBar;
use crate::menu::MenuState;
use crate::scroll;
use crate::theme::Theme;

pub struct UiState {
    pub theme: Theme,
    pub menu: MenuState,
    pub filter: FilterBar,
    reveals: Vec<OneShot>,
    records: OneShot,
    skills: OneShot,
}

/// Geometry sampled by the DOM layer for one scroll tick. A `None` metric
/// means the element is absent from the document.
pub struct ScrollSnapshot<'a> {
    pub viewport: Viewport,
    pub reveal_targets: &'a [Option<ElementMetrics>],
    pub records_anchor: Option<ElementMetrics>,
    pub skills_anchor: Option<ElementMetrics>,
}

/// What one tick decided. The DOM layer applies these and nothing else.
#[derive(Debug, Default, PartialEq)]
pub struct ScrollTick {
    pub newly_revealed: Vec<usize>,
    pub start_counters: bool,
    pub start_skill_bars: bool,
    pub navbar_elevated: bool,
}

impl UiState {
    pub fn new(theme: Theme, filter: FilterBar, reveal_count: usize) -> Self {
        Self {
            theme,
            menu: MenuState::default(),
            filter,
            reveals: (0..reveal_count).map(|_| OneShot::default()).collect(),
            records: OneShot::default(),
            skills: OneShot::default(),
        }
    }

    pub fn toggle_menu(&mut self) -> MenuState {
        self.menu = self.menu.toggled();
        self.menu
    }

    pub fn close_menu(&mut self) -> MenuState {
        self.menu = MenuState::Closed;
        self.menu
    }

    /// Runs every one-shot gate against the tick's geometry. Visibility is
    /// checked before the flag so a hidden group stays armed; the flag's
    /// check-and-set keeps every effect single-fire.
    pub fn on_scroll(&mut self, snapshot: &ScrollSnapshot) -> ScrollTick {
        let mut newly_revealed = Vec::new();
        for (index, (flag, metrics)) in self
            .reveals
            .iter_mut()
            .zip(snapshot.reveal_targets)
            .enumerate()
        {
            if animate::half_visible(snapshot.viewport, *metrics) && flag.fire() {
                newly_revealed.push(index);
            }
        }

        let start_counters = animate::half_visible(snapshot.viewport, snapshot.records_anchor)
            && self.records.fire();
        let start_skill_bars = animate::half_visible(snapshot.viewport, snapshot.skills_anchor)
            && self.skills.fire();

        ScrollTick {
            newly_revealed,
            start_counters,
            start_skill_bars,
            navbar_elevated: scroll::navbar_elevated(snapshot.viewport.scroll_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuState;

    fn state(reveal_count: usize) -> UiState {
        UiState::new(
            Theme::Light,
            FilterBar::new(vec!["*".to_string()], Some(0)),
            reveal_count,
        )
    }

    fn snapshot<'a>(
        viewport_height: f64,
        scroll_y: f64,
        reveal_targets: &'a [Option<ElementMetrics>],
        records_anchor: Option<ElementMetrics>,
    ) -> ScrollSnapshot<'a> {
        ScrollSnapshot {
            viewport: Viewport {
                height: viewport_height,
                scroll_y,
            },
            reveal_targets,
            records_anchor,
            skills_anchor: None,
        }
    }

    const OFFSCREEN: ElementMetrics = ElementMetrics {
        top: 2000.0,
        height: 100.0,
    };
    const ONSCREEN: ElementMetrics = ElementMetrics {
        top: 100.0,
        height: 100.0,
    };

    #[test]
    fn nothing_fires_below_the_threshold() {
        let mut ui = state(2);
        let targets = [Some(OFFSCREEN), Some(OFFSCREEN)];

        let tick = ui.on_scroll(&snapshot(720.0, 0.0, &targets, Some(OFFSCREEN)));
        assert!(tick.newly_revealed.is_empty());
        assert!(!tick.start_counters);
        assert!(!tick.start_skill_bars);
    }

    #[test]
    fn visible_groups_fire_once_and_stay_fired() {
        let mut ui = state(2);
        let targets = [Some(ONSCREEN), Some(OFFSCREEN)];

        let first = ui.on_scroll(&snapshot(720.0, 0.0, &targets, Some(ONSCREEN)));
        assert_eq!(first.newly_revealed, [0]);
        assert!(first.start_counters);

        // Same geometry again: every one-shot already consumed.
        let second = ui.on_scroll(&snapshot(720.0, 0.0, &targets, Some(ONSCREEN)));
        assert!(second.newly_revealed.is_empty());
        assert!(!second.start_counters);
    }

    #[test]
    fn a_group_that_scrolls_in_later_still_fires() {
        let mut ui = state(1);
        let hidden = [Some(OFFSCREEN)];
        ui.on_scroll(&snapshot(720.0, 0.0, &hidden, None));

        let shown = [Some(ONSCREEN)];
        let tick = ui.on_scroll(&snapshot(720.0, 0.0, &shown, None));
        assert_eq!(tick.newly_revealed, [0]);
    }

    #[test]
    fn absent_anchors_never_fire() {
        let mut ui = state(1);
        let targets = [None];

        let tick = ui.on_scroll(&snapshot(720.0, 0.0, &targets, None));
        assert!(tick.newly_revealed.is_empty());
        assert!(!tick.start_counters);
    }

    #[test]
    fn navbar_elevation_follows_the_scroll_offset() {
        let mut ui = state(0);
        assert!(!ui.on_scroll(&snapshot(720.0, 10.0, &[], None)).navbar_elevated);
        assert!(ui.on_scroll(&snapshot(720.0, 80.0, &[], None)).navbar_elevated);
    }

    #[test]
    fn menu_toggles_and_any_link_click_closes() {
        let mut ui = state(0);
        assert_eq!(ui.toggle_menu(), MenuState::Open);
        assert_eq!(ui.close_menu(), MenuState::Closed);

        // Closing an already-closed menu is a no-op.
        assert_eq!(ui.close_menu(), MenuState::Closed);
    }
}
