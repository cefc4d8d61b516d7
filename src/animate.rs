//! One-shot animation gating and the counter stepping function.

use crate::env::{ElementMetrics, Viewport};

pub const COUNTER_DURATION_MS: f64 = 2000.0;
pub const SKILL_STAGGER_MS: u32 = 150;

/// Flag that flips false→true exactly once per page session.
#[derive(Debug, Default)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    /// Returns true on the first call only. Never resets.
    pub fn fire(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// True once at least half of the element's own height is inside the
/// viewport. An absent element reads as "not yet visible".
pub fn half_visible(viewport: Viewport, metrics: Option<ElementMetrics>) -> bool {
    match metrics {
        Some(m) => viewport.height >= m.top + m.height * 0.5,
        None => false,
    }
}

pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

#[derive(Clone, Copy, Debug)]
pub struct CounterSample {
    pub value: u32,
    pub done: bool,
}

/// Count-up from 0 to `target` over a fixed duration. The driver feeds in
/// elapsed milliseconds; the final sample is clamped to the exact target so
/// frame timing jitter can never leave a short value on screen.
#[derive(Clone, Copy, Debug)]
pub struct CounterAnimation {
    target: u32,
    duration_ms: f64,
}

impl CounterAnimation {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            duration_ms: COUNTER_DURATION_MS,
        }
    }

    pub fn sample(&self, elapsed_ms: f64) -> CounterSample {
        let progress = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return CounterSample {
                value: self.target,
                done: true,
            };
        }

        CounterSample {
            value: (ease_out_quart(progress) * f64::from(self.target)).floor() as u32,
            done: false,
        }
    }
}

/// Per-bar transition delay for the skill-bar group.
pub fn stagger_delay_ms(index: usize) -> u32 {
    index as u32 * SKILL_STAGGER_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: f64) -> Viewport {
        Viewport {
            height,
            scroll_y: 0.0,
        }
    }

    #[test]
    fn one_shot_fires_exactly_once() {
        let mut flag = OneShot::default();
        assert!(flag.fire());
        assert!(!flag.fire());
        assert!(!flag.fire());
        assert!(flag.has_fired());
    }

    #[test]
    fn element_below_half_visibility_is_not_visible() {
        let metrics = Some(ElementMetrics {
            top: 700.0,
            height: 200.0,
        });
        assert!(!half_visible(viewport(720.0), metrics));
    }

    #[test]
    fn element_at_half_visibility_is_visible() {
        // top + height/2 == 720 exactly; the comparison is inclusive.
        let metrics = Some(ElementMetrics {
            top: 620.0,
            height: 200.0,
        });
        assert!(half_visible(viewport(720.0), metrics));
    }

    #[test]
    fn absent_element_is_never_visible() {
        assert!(!half_visible(viewport(10_000.0), None));
    }

    #[test]
    fn ease_out_quart_hits_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn counter_lands_exactly_on_target() {
        let counter = CounterAnimation::new(250);
        let done = counter.sample(COUNTER_DURATION_MS);
        assert_eq!(done.value, 250);
        assert!(done.done);

        // A late frame past the duration still reads the exact target.
        let late = counter.sample(COUNTER_DURATION_MS + 1234.5);
        assert_eq!(late.value, 250);
        assert!(late.done);
    }

    #[test]
    fn counter_starts_at_zero_and_never_decreases() {
        let counter = CounterAnimation::new(250);
        assert_eq!(counter.sample(0.0).value, 0);

        // Drive with a fake 60 Hz clock; displayed value is monotone.
        let mut previous = 0;
        let mut elapsed = 0.0;
        while elapsed <= COUNTER_DURATION_MS + 32.0 {
            let sample = counter.sample(elapsed);
            assert!(sample.value >= previous);
            assert!(sample.value <= 250);
            previous = sample.value;
            elapsed += 16.0;
        }
        assert_eq!(previous, 250);
    }

    #[test]
    fn counter_ignores_negative_elapsed() {
        let counter = CounterAnimation::new(42);
        assert_eq!(counter.sample(-50.0).value, 0);
    }

    #[test]
    fn skill_bars_stagger_by_index() {
        assert_eq!(stagger_delay_ms(0), 0);
        assert_eq!(stagger_delay_ms(1), SKILL_STAGGER_MS);
        assert_eq!(stagger_delay_ms(3), 3 * SKILL_STAGGER_MS);
    }
}
