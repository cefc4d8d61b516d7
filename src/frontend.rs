use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlElement, HtmlInputElement, ScrollBehavior, ScrollToOptions,
    Storage, Window,
};

use crate::animate::{stagger_delay_ms, CounterAnimation};
use crate::carousel::{self, CarouselConfig};
use crate::env::{CarouselEngine, ElementMetrics, LayoutEngine, PreferenceStore, Viewport};
use crate::filter::FilterBar;
use crate::form;
use crate::menu;
use crate::scroll;
use crate::state::{ScrollSnapshot, UiState};
use crate::theme::{self, Theme};

const REVEAL_SELECTOR: &str = ".section, .card-wrap, .grid-item";
const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;
const GRID_SELECTOR: &str = ".grid";
const GRID_ITEM_SELECTOR: &str = ".grid-item";
const GRID_LAYOUT_MODE: &str = "fitRows";
const GRID_TRANSITION_DURATION: &str = "0.5s";
const CAROUSEL_SELECTOR: &str = ".swiper-container";
const ACTIVE_CLASS: &str = "active";
const LOADED_CLASS: &str = "loaded";

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let Some(win) = window() else { return };
    let Some(document) = win.document() else { return };
    let Some(page) = Page::collect(&document) else {
        log::debug!("document has no body; nothing to wire");
        return;
    };
    let page = Rc::new(page);

    let initial_theme = theme::resolve(&LocalStorePrefs, system_prefers_dark());
    apply_theme(&page.body, initial_theme);

    let grid: Rc<dyn LayoutEngine> = match IsotopeGrid::find() {
        Some(grid) => {
            grid.init_layout();
            Rc::new(grid)
        }
        None => {
            log::debug!("grid layout library missing; filter relayout disabled");
            Rc::new(InertGrid)
        }
    };

    match SwiperCarousel::find() {
        Some(engine) => carousel::start(&engine),
        None => log::debug!("carousel library missing; slider disabled"),
    }

    let tags = page
        .filter_buttons
        .iter()
        .map(|button| button.get_attribute("data-filter").unwrap_or_default())
        .collect();
    let initially_active = page
        .filter_buttons
        .iter()
        .position(|button| button.class_list().contains(ACTIVE_CLASS));
    let state = Rc::new(RefCell::new(UiState::new(
        initial_theme,
        FilterBar::new(tags, initially_active),
        page.reveal_targets.len(),
    )));

    prime_reveal_targets(&page.reveal_targets);
    wire_menu(&page, &state);
    wire_filter_buttons(&page, &state, grid);
    wire_smooth_scroll(&page, &document);
    wire_theme_toggle(&page, &state);
    wire_contact_form(&page);
    wire_footer_input(&page);
    wire_scroll(&win, &page, &state);

    let _ = page.body.class_list().add_1(LOADED_CLASS);
    log::debug!(
        "wired: {} reveal targets, {} counters, {} skill bars, {} filter buttons",
        page.reveal_targets.len(),
        page.numbers.len(),
        page.skill_bars.len(),
        page.filter_buttons.len()
    );
}

struct Page {
    body: HtmlElement,
    navbar: Option<Element>,
    hamburger: Option<Element>,
    nav_links: Vec<HtmlElement>,
    filter_buttons: Vec<Element>,
    records_wrap: Option<HtmlElement>,
    numbers: Vec<HtmlElement>,
    skill_bars: Vec<HtmlElement>,
    reveal_targets: Vec<HtmlElement>,
    footer_input: Option<HtmlInputElement>,
    contact_form: Option<Element>,
    theme_toggle: Option<Element>,
    sections: Vec<HtmlElement>,
    anchors: Vec<Element>,
    nav: Option<HtmlElement>,
}

impl Page {
    fn collect(document: &Document) -> Option<Self> {
        let body = document.body()?;

        Some(Self {
            navbar: query(document, "header nav"),
            hamburger: query(document, ".hamburger-menu"),
            nav_links: query_all_html(document, ".links a"),
            filter_buttons: query_all(document, ".filter-btn"),
            records_wrap: query_html(document, ".records"),
            numbers: query_all_html(document, ".number[data-num]"),
            skill_bars: query_all_html(document, ".skill-progress[data-progress]"),
            reveal_targets: query_all_html(document, REVEAL_SELECTOR),
            footer_input: query(document, ".footer-input")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok()),
            contact_form: query(document, ".contact-form form"),
            theme_toggle: query(document, "#themeToggle"),
            sections: query_all_html(document, "section[id]"),
            anchors: query_all(document, ANCHOR_SELECTOR),
            nav: query_html(document, "nav"),
            body,
        })
    }
}

fn wire_menu(page: &Rc<Page>, state: &Rc<RefCell<UiState>>) {
    let Some(hamburger) = &page.hamburger else {
        return;
    };

    {
        let state = Rc::clone(state);
        let page = Rc::clone(page);
        EventListener::new(hamburger, "click", move |_| {
            let open = state.borrow_mut().toggle_menu().is_open();
            sync_menu(&page, open);
        })
        .forget();
    }

    for link in &page.nav_links {
        let state = Rc::clone(state);
        let page = Rc::clone(page);
        EventListener::new(link, "click", move |_| {
            state.borrow_mut().close_menu();
            sync_menu(&page, false);
        })
        .forget();
    }
}

fn sync_menu(page: &Page, open: bool) {
    if let Some(navbar) = &page.navbar {
        let classes = navbar.class_list();
        if open {
            let _ = classes.add_1(menu::OPEN_CLASS);
        } else {
            let _ = classes.remove_1(menu::OPEN_CLASS);
        }
    }

    let body_classes = page.body.class_list();
    if open {
        let _ = body_classes.add_1(menu::SCROLL_LOCK_CLASS);
    } else {
        let _ = body_classes.remove_1(menu::SCROLL_LOCK_CLASS);
    }
}

fn wire_filter_buttons(page: &Rc<Page>, state: &Rc<RefCell<UiState>>, grid: Rc<dyn LayoutEngine>) {
    for (index, button) in page.filter_buttons.iter().enumerate() {
        let state = Rc::clone(state);
        let grid = Rc::clone(&grid);
        let buttons = page.filter_buttons.clone();
        let clicked = button.clone();
        EventListener::new(button, "click", move |_| {
            for other in &buttons {
                let _ = other.class_list().remove_1(ACTIVE_CLASS);
            }
            let _ = clicked.class_list().add_1(ACTIVE_CLASS);
            state.borrow_mut().filter.select(index, grid.as_ref());
        })
        .forget();
    }
}

fn wire_smooth_scroll(page: &Rc<Page>, document: &Document) {
    for anchor in &page.anchors {
        let anchor_el = anchor.clone();
        let document = document.clone();
        EventListener::new(anchor, "click", move |event| {
            let Some(href) = anchor_el.get_attribute("href") else {
                return;
            };
            let Some(selector) = scroll::anchor_fragment(&href) else {
                return;
            };
            event.prevent_default();

            let Some(target) =
                query(&document, selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            smooth_scroll_to(scroll::smooth_scroll_target(f64::from(target.offset_top())));
        })
        .forget();
    }
}

fn wire_theme_toggle(page: &Rc<Page>, state: &Rc<RefCell<UiState>>) {
    let Some(toggle) = &page.theme_toggle else {
        return;
    };

    let state = Rc::clone(state);
    let page = Rc::clone(page);
    EventListener::new(toggle, "click", move |_| {
        let mut ui = state.borrow_mut();
        ui.theme = theme::toggle(&LocalStorePrefs, ui.theme);
        apply_theme(&page.body, ui.theme);
    })
    .forget();
}

fn wire_contact_form(page: &Rc<Page>) {
    let Some(form_el) = &page.contact_form else {
        return;
    };
    let Some(button) = form_el
        .query_selector(".btn")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    EventListener::new(form_el, "submit", move |_| {
        let _ = button.class_list().add_1(form::LOADING_CLASS);
        button.set_text_content(Some(form::SENDING_LABEL));
    })
    .forget();
}

fn wire_footer_input(page: &Rc<Page>) {
    let Some(input) = &page.footer_input else {
        return;
    };

    let on_focus = input.clone();
    EventListener::new(input, "focus", move |_| {
        let _ = on_focus.class_list().add_1(form::FOCUS_CLASS);
    })
    .forget();

    let on_blur = input.clone();
    EventListener::new(input, "blur", move |_| {
        if form::keep_focus_class(&on_blur.value()) {
            return;
        }
        let _ = on_blur.class_list().remove_1(form::FOCUS_CLASS);
    })
    .forget();
}

fn wire_scroll(win: &Window, page: &Rc<Page>, state: &Rc<RefCell<UiState>>) {
    let scroll_page = Rc::clone(page);
    let scroll_state = Rc::clone(state);
    EventListener::new(win, "scroll", move |_| {
        scroll_tick(&scroll_page, &scroll_state);
    })
    .forget();

    // Content already in view animates without waiting for a scroll event.
    scroll_tick(page, state);
}

fn scroll_tick(page: &Page, state: &Rc<RefCell<UiState>>) {
    let viewport = viewport();
    let reveal_metrics: Vec<Option<ElementMetrics>> = page
        .reveal_targets
        .iter()
        .map(|el| Some(metrics_of(el)))
        .collect();
    let snapshot = ScrollSnapshot {
        viewport,
        reveal_targets: &reveal_metrics,
        records_anchor: page.records_wrap.as_ref().map(metrics_of),
        skills_anchor: page.skill_bars.first().map(metrics_of),
    };

    let tick = state.borrow_mut().on_scroll(&snapshot);

    for index in &tick.newly_revealed {
        if let Some(el) = page.reveal_targets.get(*index) {
            reveal(el);
        }
    }
    if tick.start_counters {
        start_counters(&page.numbers);
    }
    if tick.start_skill_bars {
        start_skill_bars(&page.skill_bars);
    }
    if let Some(nav) = &page.nav {
        elevate_nav(nav, tick.navbar_elevated);
    }
    refresh_nav_highlight(page, viewport.scroll_y);
}

fn prime_reveal_targets(targets: &[HtmlElement]) {
    for el in targets {
        let style = el.style();
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transform", "translateY(30px)");
        let _ = style.set_property("transition", REVEAL_TRANSITION);
    }
}

fn reveal(el: &HtmlElement) {
    let style = el.style();
    let _ = style.set_property("opacity", "1");
    let _ = style.set_property("transform", "translateY(0)");
}

fn elevate_nav(nav: &HtmlElement, elevated: bool) {
    let value = if elevated { scroll::NAV_SHADOW } else { "none" };
    let _ = nav.style().set_property("box-shadow", value);
}

fn refresh_nav_highlight(page: &Page, scroll_y: f64) {
    for section in &page.sections {
        let Some(id) = section.get_attribute("id") else {
            continue;
        };
        let in_band = scroll::section_in_band(
            scroll_y,
            f64::from(section.offset_top()),
            f64::from(section.offset_height()),
        );
        if !in_band {
            continue;
        }

        let section_href = format!("#{id}");
        let has_link = page
            .nav_links
            .iter()
            .any(|link| link.get_attribute("href").as_deref() == Some(section_href.as_str()));
        if !has_link {
            continue;
        }

        for link in &page.nav_links {
            let href = link.get_attribute("href").unwrap_or_default();
            if scroll::clear_stale_highlight(link.class_list().contains(ACTIVE_CLASS), &href) {
                let _ = link.style().remove_property("color");
            }
        }
    }
}

struct CounterRun {
    counters: Vec<(HtmlElement, CounterAnimation)>,
    started_at: Cell<Option<f64>>,
    frame: RefCell<Option<AnimationFrame>>,
}

fn start_counters(numbers: &[HtmlElement]) {
    let counters: Vec<(HtmlElement, CounterAnimation)> = numbers
        .iter()
        .filter_map(|el| {
            let target = el.dataset().get("num")?.parse::<u32>().ok()?;
            Some((el.clone(), CounterAnimation::new(target)))
        })
        .collect();
    if counters.is_empty() {
        return;
    }

    let run = Rc::new(CounterRun {
        counters,
        started_at: Cell::new(None),
        frame: RefCell::new(None),
    });
    schedule_counter_frame(&run);
}

fn schedule_counter_frame(run: &Rc<CounterRun>) {
    let next = Rc::clone(run);
    let handle = request_animation_frame(move |now| {
        next.frame.borrow_mut().take();

        let started = match next.started_at.get() {
            Some(at) => at,
            None => {
                next.started_at.set(Some(now));
                now
            }
        };
        let elapsed = now - started;

        let mut live = false;
        for (el, counter) in &next.counters {
            let sample = counter.sample(elapsed);
            el.set_text_content(Some(&sample.value.to_string()));
            live |= !sample.done;
        }
        if live {
            schedule_counter_frame(&next);
        }
    });
    *run.frame.borrow_mut() = Some(handle);
}

fn start_skill_bars(bars: &[HtmlElement]) {
    for (index, bar) in bars.iter().enumerate() {
        let Some(progress) = bar.dataset().get("progress") else {
            continue;
        };
        let style = bar.style();
        let _ = style.set_property("transition-delay", &format!("{}ms", stagger_delay_ms(index)));
        let _ = style.set_property("width", &format!("{progress}%"));
    }
}

struct LocalStorePrefs;

impl PreferenceStore for LocalStorePrefs {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

struct InertGrid;

impl LayoutEngine for InertGrid {
    fn refilter(&self, _tag: &str) {}
}

struct IsotopeGrid {
    jquery: Function,
}

impl IsotopeGrid {
    fn find() -> Option<Self> {
        let jquery = global_function("jQuery").or_else(|| global_function("$"))?;
        Some(Self { jquery })
    }

    fn init_layout(&self) {
        let options = Object::new();
        set_key(&options, "itemSelector", &GRID_ITEM_SELECTOR.into());
        set_key(&options, "layoutMode", &GRID_LAYOUT_MODE.into());
        set_key(&options, "transitionDuration", &GRID_TRANSITION_DURATION.into());
        self.call_isotope(&options.into());
    }

    fn call_isotope(&self, argument: &JsValue) {
        let Ok(wrapped) = self
            .jquery
            .call1(&JsValue::NULL, &JsValue::from_str(GRID_SELECTOR))
        else {
            return;
        };
        let Ok(method) = Reflect::get(&wrapped, &JsValue::from_str("isotope")) else {
            return;
        };
        let Some(method) = method.dyn_ref::<Function>() else {
            return;
        };
        let _ = method.call1(&wrapped, argument);
    }
}

impl LayoutEngine for IsotopeGrid {
    fn refilter(&self, tag: &str) {
        let options = Object::new();
        set_key(&options, "filter", &tag.into());
        self.call_isotope(&options.into());
    }
}

struct SwiperCarousel {
    constructor: Function,
}

impl SwiperCarousel {
    fn find() -> Option<Self> {
        Some(Self {
            constructor: global_function("Swiper")?,
        })
    }
}

impl CarouselEngine for SwiperCarousel {
    fn start(&self, config: &CarouselConfig) {
        let options = Object::new();
        set_key(&options, "speed", &config.speed_ms.into());
        set_key(&options, "slidesPerView", &config.slides_per_view.into());
        set_key(&options, "loop", &config.loop_slides.into());

        let autoplay = Object::new();
        set_key(&autoplay, "delay", &config.autoplay_delay_ms.into());
        set_key(
            &autoplay,
            "disableOnInteraction",
            &config.autoplay_disable_on_interaction.into(),
        );
        set_key(
            &autoplay,
            "pauseOnMouseEnter",
            &config.autoplay_pause_on_mouse_enter.into(),
        );
        set_key(&options, "autoplay", &autoplay.into());

        let navigation = Object::new();
        set_key(&navigation, "prevEl", &config.prev_button.into());
        set_key(&navigation, "nextEl", &config.next_button.into());
        set_key(&options, "navigation", &navigation.into());

        let pagination = Object::new();
        set_key(&pagination, "el", &config.pagination.into());
        set_key(&pagination, "clickable", &config.pagination_clickable.into());
        set_key(&options, "pagination", &pagination.into());

        set_key(&options, "effect", &config.effect.into());
        set_key(&options, "grabCursor", &config.grab_cursor.into());

        let args = Array::of2(&JsValue::from_str(CAROUSEL_SELECTOR), &options.into());
        let _ = Reflect::construct(&self.constructor, &args);
    }
}

fn apply_theme(body: &HtmlElement, theme: Theme) {
    let classes = body.class_list();
    if theme.is_dark() {
        let _ = classes.add_1(theme::DARK_CLASS);
    } else {
        let _ = classes.remove_1(theme::DARK_CLASS);
    }
}

fn system_prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn smooth_scroll_to(top: f64) {
    let Some(win) = window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

fn viewport() -> Viewport {
    let Some(win) = window() else {
        return Viewport {
            height: 0.0,
            scroll_y: 0.0,
        };
    };

    Viewport {
        height: win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
        scroll_y: win.page_y_offset().unwrap_or(0.0),
    }
}

fn metrics_of(el: &HtmlElement) -> ElementMetrics {
    ElementMetrics {
        top: el.get_bounding_client_rect().top(),
        height: f64::from(el.offset_height()),
    }
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    query(document, selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all_html(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn global_function(name: &str) -> Option<Function> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn set_key(target: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}
