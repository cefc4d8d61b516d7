use crate::env::CarouselEngine;

/// Fixed option set handed to the carousel library once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselConfig {
    pub speed_ms: u32,
    pub slides_per_view: u32,
    pub loop_slides: bool,
    pub autoplay_delay_ms: u32,
    pub autoplay_disable_on_interaction: bool,
    pub autoplay_pause_on_mouse_enter: bool,
    pub prev_button: &'static str,
    pub next_button: &'static str,
    pub pagination: &'static str,
    pub pagination_clickable: bool,
    pub effect: &'static str,
    pub grab_cursor: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            speed_ms: 800,
            slides_per_view: 1,
            loop_slides: true,
            autoplay_delay_ms: 4000,
            autoplay_disable_on_interaction: false,
            autoplay_pause_on_mouse_enter: true,
            prev_button: ".swiper-button-prev",
            next_button: ".swiper-button-next",
            pagination: ".swiper-pagination",
            pagination_clickable: true,
            effect: "slide",
            grab_cursor: true,
        }
    }
}

pub fn start(engine: &dyn CarouselEngine) {
    engine.start(&CarouselConfig::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingCarousel {
        configs: RefCell<Vec<CarouselConfig>>,
    }

    impl CarouselEngine for RecordingCarousel {
        fn start(&self, config: &CarouselConfig) {
            self.configs.borrow_mut().push(config.clone());
        }
    }

    #[test]
    fn carousel_is_constructed_once_with_the_fixed_options() {
        let engine = RecordingCarousel::default();
        start(&engine);

        let configs = engine.configs.borrow();
        assert_eq!(configs.len(), 1);
        let config = &configs[0];
        assert_eq!(config.speed_ms, 800);
        assert_eq!(config.autoplay_delay_ms, 4000);
        assert!(config.loop_slides);
        assert!(!config.autoplay_disable_on_interaction);
        assert!(config.autoplay_pause_on_mouse_enter);
        assert_eq!(config.effect, "slide");
    }
}
