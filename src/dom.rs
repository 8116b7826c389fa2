use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, NodeList,
};

use crate::bridge::{element_top, run_frame_loop, scroll_y, viewport_size};
use crate::engines::{Animator, Tween};
use crate::frontend::AppContext;
use crate::hover::{
    float_shapes, magnetic_tween, parallax_shift, pointer_percent, tilt_tween, tooltip_position,
    HoverPhase, Rect, Tooltip,
};
use crate::images::{load_lazy_image, LazyImageHost, LAZY_SELECTOR};
use crate::reveal::{RevealCategory, RevealHost, RevealMode, RevealTrigger};
use crate::scroll::{link_targets, ScrollSpy};
use crate::skills::{category_visible, fill_width, BarGroup, CounterAnimation, FILTER_ALL};

const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const HALF_VISIBLE: f64 = 0.5;

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

fn select_within(element: &Element, selector: &str) -> Vec<Element> {
    element
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

fn hover_phase(event_type: &str, event: &Event) -> Option<HoverPhase> {
    match event_type {
        "mouseenter" => Some(HoverPhase::Enter),
        "mouseleave" => Some(HoverPhase::Leave),
        _ => event.dyn_ref::<MouseEvent>().map(|mouse| {
            HoverPhase::Move(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
        }),
    }
}

struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityObserver {
    fn new<F>(thresholds: &[f64], root_margin: Option<&str>, mut on_entry: F) -> Option<Self>
    where
        F: FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
    {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        on_entry(&entry, &observer);
                    }
                }
            },
        );

        let threshold: Array = thresholds.iter().map(|value| JsValue::from_f64(*value)).collect();
        let init = IntersectionObserverInit::new();
        init.set_threshold(&threshold);
        if let Some(margin) = root_margin {
            init.set_root_margin(margin);
        }

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;
        Some(Self {
            observer,
            _callback: callback,
        })
    }

    fn observe_all(&self, targets: &[Element]) {
        for target in targets {
            self.observer.observe(target);
        }
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Page-level listeners and observers. Dropping it detaches everything.
#[derive(Default)]
pub struct Behaviors {
    listeners: Vec<EventListener>,
    observers: Vec<VisibilityObserver>,
}

impl Behaviors {
    pub fn install(context: &AppContext) -> Self {
        let mut behaviors = Self::default();
        let Some(document) = window().and_then(|w| w.document()) else {
            return behaviors;
        };

        behaviors.listeners.push(anchor_navigation(&document, context));
        behaviors.listeners.extend(scroll_spy(&document, context));
        behaviors.observers.extend(reveals(&document, context));
        behaviors.listeners.extend(tooltips(&document));

        if !context.reduced_motion() {
            let animator = Rc::clone(&context.engines().animator);
            behaviors.listeners.extend(hover_effects(&document, &animator));
            behaviors.listeners.extend(pointer_tracking(&document));
            parallax(&document, &*animator);
        }
        float_shapes(
            &select_all(&document, ".shape"),
            context.reduced_motion(),
            &*context.engines().animator,
        );
        behaviors.observers.extend(lazy_images(&document));

        behaviors.listeners.extend(skill_filters(&document));
        for group in [BarGroup::Skills, BarGroup::Languages] {
            behaviors.observers.extend(bar_fills(&document, group));
        }
        behaviors.observers.extend(counters(&document, context));

        context.logger().debug(
            "behaviors_installed",
            json!({
                "listeners": behaviors.listeners.len(),
                "observers": behaviors.observers.len(),
            }),
        );
        behaviors
    }
}

fn anchor_navigation(document: &Document, context: &AppContext) -> EventListener {
    let context = context.clone();
    EventListener::new_with_options(
        document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(anchor) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest("a[href^=\"#\"]").ok().flatten())
            else {
                return;
            };
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let id = href.trim_start_matches('#');
            if !id.is_empty() && context.scroll_to_id(id) {
                event.prevent_default();
            }
        },
    )
}

fn scroll_spy(document: &Document, context: &AppContext) -> Option<EventListener> {
    let win = window()?;
    let sections = select_all(document, "section[id]");
    let links = select_all(document, ".nav-link");
    let spy = RefCell::new(ScrollSpy::new(context.config().spy_lead_px));

    let refresh = move |force: bool| {
        let tops: Vec<(String, f64)> = sections
            .iter()
            .map(|section| (section.id(), element_top(section)))
            .collect();
        let mut spy = spy.borrow_mut();
        let changed = spy.update(scroll_y(), tops.iter().map(|(id, top)| (id.as_str(), *top)));
        if !changed && !force {
            return;
        }
        for link in &links {
            let href = link.get_attribute("href").unwrap_or_default();
            let _ = link
                .class_list()
                .toggle_with_force("active", link_targets(&href, spy.active()));
        }
    };

    refresh(true);
    Some(EventListener::new(&win, "scroll", move |_| refresh(false)))
}

struct DomRevealHost;

impl RevealHost<Element> for DomRevealHost {
    fn category(&self, element: &Element) -> Option<RevealCategory> {
        element
            .get_attribute("data-reveal")
            .as_deref()
            .and_then(RevealCategory::from_attr)
    }

    fn delay(&self, element: &Element) -> f64 {
        element
            .get_attribute("data-delay")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|delay| delay.is_finite() && *delay >= 0.0)
            .unwrap_or(0.0)
    }

    fn items(&self, element: &Element) -> Vec<Element> {
        select_within(element, "[data-reveal-item]")
    }

    fn progress_bar(&self, element: &Element) -> Option<Element> {
        element.query_selector(".timeline-progress").ok().flatten()
    }

    fn mark_revealed(&self, element: &Element) {
        let _ = element.class_list().add_1("animate");
    }
}

fn reveals(document: &Document, context: &AppContext) -> Option<VisibilityObserver> {
    let targets = Rc::new(select_all(document, "[data-reveal]"));
    let trigger =
        RevealTrigger::start(targets.as_slice(), &DomRevealHost, context.reduced_motion());
    if trigger.mode() == RevealMode::Immediate || targets.is_empty() {
        return None;
    }

    let thresholds = trigger.observer_thresholds();
    let trigger = RefCell::new(trigger);
    let animator = Rc::clone(&context.engines().animator);
    let observed = Rc::clone(&targets);

    let observer = VisibilityObserver::new(
        &thresholds,
        Some(REVEAL_ROOT_MARGIN),
        move |entry, observer| {
            let target = entry.target();
            let Some(index) = observed.iter().position(|element| *element == target) else {
                return;
            };
            let fired = trigger.borrow_mut().on_visible(
                index,
                entry.is_intersecting(),
                entry.intersection_ratio(),
                observed.as_slice(),
                &DomRevealHost,
                &*animator,
            );
            if fired {
                observer.unobserve(&target);
            }
        },
    )?;
    observer.observe_all(&targets);
    Some(observer)
}

fn hover_listeners<F>(
    element: &Element,
    animator: &Rc<dyn Animator<Element>>,
    tween_for: F,
) -> Vec<EventListener>
where
    F: Fn(HoverPhase, &Rect) -> Tween + Copy + 'static,
{
    ["mouseenter", "mousemove", "mouseleave"]
        .into_iter()
        .map(|event_type| {
            let target = element.clone();
            let animator = Rc::clone(animator);
            EventListener::new(element, event_type, move |event| {
                if let Some(phase) = hover_phase(event_type, event) {
                    let tween = tween_for(phase, &element_rect(&target));
                    animator.to(std::slice::from_ref(&target), &tween);
                }
            })
        })
        .collect()
}

fn hover_effects(document: &Document, animator: &Rc<dyn Animator<Element>>) -> Vec<EventListener> {
    if !animator.is_active() {
        return Vec::new();
    }

    let mut listeners = Vec::new();
    for element in select_all(document, ".magnetic") {
        listeners.extend(hover_listeners(&element, animator, magnetic_tween));
    }
    for element in select_all(document, ".tilt-card") {
        listeners.extend(hover_listeners(&element, animator, tilt_tween));
    }
    listeners
}

fn place_tooltip(tooltip: &HtmlElement, event: &Event) {
    let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
        return;
    };
    let rect = tooltip.get_bounding_client_rect();
    let (viewport_width, _) = viewport_size();
    let (left, top) = tooltip_position(
        (f64::from(mouse.client_x()), f64::from(mouse.client_y())),
        (rect.width(), rect.height()),
        viewport_width,
    );
    let style = tooltip.style();
    let _ = style.set_property("left", &format!("{left}px"));
    let _ = style.set_property("top", &format!("{top}px"));
}

fn tooltips(document: &Document) -> Vec<EventListener> {
    let Some(tooltip) = document
        .get_element_by_id("tooltip")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return Vec::new();
    };
    let content = tooltip.query_selector(".tooltip-content").ok().flatten();

    let state = Rc::new(RefCell::new(Tooltip::default()));

    let mut listeners = Vec::new();
    for source in select_all(document, "[data-tooltip]") {
        for event_type in ["mouseenter", "mousemove", "mouseleave"] {
            let state = Rc::clone(&state);
            let tooltip = tooltip.clone();
            let content = content.clone();
            let text_source = source.clone();
            listeners.push(EventListener::new(&source, event_type, move |event| {
                let mut state = state.borrow_mut();
                match hover_phase(event_type, event) {
                    Some(HoverPhase::Enter) => {
                        let text = text_source.get_attribute("data-tooltip");
                        let Some(text) = state.enter(text.as_deref()) else {
                            return;
                        };
                        if let Some(content) = content.as_ref() {
                            content.set_text_content(Some(text));
                        }
                        let _ = tooltip.class_list().add_1("show");
                        place_tooltip(&tooltip, event);
                    }
                    Some(HoverPhase::Move(..)) if state.follows_pointer() => {
                        place_tooltip(&tooltip, event);
                    }
                    Some(HoverPhase::Leave) => {
                        state.leave();
                        let _ = tooltip.class_list().remove_1("show");
                    }
                    _ => {}
                }
            }));
        }
    }
    listeners
}

fn pointer_tracking(document: &Document) -> Option<EventListener> {
    let root = document.document_element()?.dyn_into::<HtmlElement>().ok()?;
    Some(EventListener::new(document, "mousemove", move |event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let (x, y) = pointer_percent(
            (f64::from(mouse.client_x()), f64::from(mouse.client_y())),
            viewport_size(),
        );
        let style = root.style();
        let _ = style.set_property("--mouse-x", &format!("{x}%"));
        let _ = style.set_property("--mouse-y", &format!("{y}%"));
    }))
}

fn parallax(document: &Document, animator: &dyn Animator<Element>) {
    if !animator.is_active() {
        return;
    }
    for element in select_all(document, "[data-parallax]") {
        let shift = parallax_shift(element.get_attribute("data-parallax").as_deref());
        animator.parallax(&element, shift);
    }
}

struct DomImageHost;

impl LazyImageHost<Element> for DomImageHost {
    fn attribute(&self, image: &Element, name: &str) -> Option<String> {
        image.get_attribute(name)
    }

    fn set_attribute(&self, image: &Element, name: &str, value: &str) {
        let _ = image.set_attribute(name, value);
    }

    fn remove_class(&self, image: &Element, class: &str) {
        let _ = image.class_list().remove_1(class);
    }
}

fn lazy_images(document: &Document) -> Option<VisibilityObserver> {
    let images = select_all(document, LAZY_SELECTOR);
    if images.is_empty() {
        return None;
    }

    let observer = VisibilityObserver::new(&[0.0], None, |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let image = entry.target();
        load_lazy_image(&image, &DomImageHost);
        observer.unobserve(&image);
    })?;
    observer.observe_all(&images);
    Some(observer)
}

fn skill_filters(document: &Document) -> Vec<EventListener> {
    let pills = Rc::new(select_all(document, ".filter-pill"));
    let categories = Rc::new(select_all(document, ".skills-category"));

    pills
        .iter()
        .map(|pill| {
            let pills = Rc::clone(&pills);
            let categories = Rc::clone(&categories);
            let clicked = pill.clone();
            EventListener::new(pill, "click", move |_| {
                let filter = clicked
                    .get_attribute("data-filter")
                    .unwrap_or_else(|| FILTER_ALL.to_string());
                for pill in pills.iter() {
                    let _ = pill.class_list().toggle_with_force("active", *pill == clicked);
                }
                for category in categories.iter() {
                    let name = category.get_attribute("data-category").unwrap_or_default();
                    let _ = category
                        .class_list()
                        .toggle_with_force("hidden", !category_visible(&filter, &name));
                }
            })
        })
        .collect()
}

fn bar_fills(document: &Document, group: BarGroup) -> Option<VisibilityObserver> {
    let containers = select_all(document, group.container_selector());
    if containers.is_empty() {
        return None;
    }

    let observer = VisibilityObserver::new(&[HALF_VISIBLE], None, move |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let container = entry.target();
        observer.unobserve(&container);

        for (index, fill) in select_within(&container, group.fill_selector())
            .into_iter()
            .enumerate()
        {
            let Ok(fill) = fill.dyn_into::<HtmlElement>() else {
                continue;
            };
            let Some(width) = fill.get_attribute("data-percent").as_deref().and_then(fill_width)
            else {
                continue;
            };
            let _ = Timeout::new(group.fill_delay_ms(index), move || {
                let _ = fill.style().set_property("width", &width);
            })
            .forget();
        }
    })?;
    observer.observe_all(&containers);
    Some(observer)
}

fn counters(document: &Document, context: &AppContext) -> Option<VisibilityObserver> {
    let containers = select_all(document, "[data-animate-counters]");
    if containers.is_empty() {
        return None;
    }

    let duration_ms = context.config().counter_duration_ms as f64;
    let observer = VisibilityObserver::new(&[HALF_VISIBLE], None, move |entry, observer| {
        if !entry.is_intersecting() {
            return;
        }
        let container = entry.target();
        observer.unobserve(&container);

        for counter in select_within(&container, "[data-count]") {
            let target = counter.get_attribute("data-count").unwrap_or_default();
            let current = counter.text_content().unwrap_or_default();
            let Some(mut animation) = CounterAnimation::new(&target, &current, duration_ms) else {
                continue;
            };
            run_frame_loop(move |now| {
                let frame = animation.frame(now);
                counter.set_text_content(Some(&frame.text));
                !frame.done
            });
        }
    })?;
    observer.observe_all(&containers);
    Some(observer)
}
