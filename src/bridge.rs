use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::{Array, Function, Object, Reflect};
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    window, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::SiteConfig;
use crate::engines::{
    Animator, Celebration, Ease, NoAnimation, NoCelebration, Pose, ScrollEngine, Tween,
    TypingEngine,
};
use crate::logging::Logger;
use crate::scroll::{ScrollAnimation, ScrollRequest};

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub fn element_top(element: &Element) -> f64 {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => f64::from(html.offset_top()),
        None => element.get_bounding_client_rect().top() + scroll_y(),
    }
}

/// Runs `step` once per animation frame until it returns false.
pub fn run_frame_loop<F>(step: F)
where
    F: FnMut(f64) -> bool + 'static,
{
    schedule_frame(Rc::new(RefCell::new(None)), Rc::new(RefCell::new(step)));
}

fn schedule_frame<F>(slot: Rc<RefCell<Option<AnimationFrame>>>, step: Rc<RefCell<F>>)
where
    F: FnMut(f64) -> bool + 'static,
{
    let next_slot = Rc::clone(&slot);
    let handle = request_animation_frame(move |timestamp| {
        let keep_going = (step.borrow_mut())(timestamp);
        if keep_going {
            schedule_frame(Rc::clone(&next_slot), Rc::clone(&step));
        } else {
            next_slot.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(handle);
}

fn global(name: &str) -> Option<JsValue> {
    let window: JsValue = window()?.into();
    Reflect::get(&window, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, JsValue> {
    let method = Reflect::get(target, &JsValue::from_str(name))?;
    let method = method.dyn_into::<Function>()?;
    method.apply(target, args)
}

fn set(object: &Object, key: &str, value: impl Into<JsValue>) {
    let _ = Reflect::set(object, &JsValue::from_str(key), &value.into());
}

fn pose_object(pose: &Pose) -> Object {
    let object = Object::new();
    let numeric = [
        ("opacity", pose.opacity),
        ("x", pose.x),
        ("y", pose.y),
        ("z", pose.z),
        ("scale", pose.scale),
        ("rotation", pose.rotation),
        ("rotationX", pose.rotation_x),
        ("rotationY", pose.rotation_y),
    ];
    for (key, value) in numeric {
        if let Some(value) = value {
            set(&object, key, value);
        }
    }
    if let Some(height) = pose.height_percent {
        set(&object, "height", format!("{height}%"));
    }
    object
}

fn tween_object(tween: &Tween) -> Object {
    let object = pose_object(&tween.to);
    set(&object, "duration", tween.duration);
    set(&object, "ease", tween.ease.as_str());
    if tween.delay > 0.0 {
        set(&object, "delay", tween.delay);
    }
    if tween.stagger > 0.0 {
        set(&object, "stagger", tween.stagger);
    }
    object
}

fn element_array(targets: &[Element]) -> Array {
    targets.iter().collect()
}

pub struct GsapAnimator {
    gsap: JsValue,
    scroll_trigger: Option<JsValue>,
    logger: Logger,
}

impl GsapAnimator {
    fn detect(logger: Logger) -> Option<Self> {
        let gsap = global("gsap")?;
        let scroll_trigger = global("ScrollTrigger");
        if let Some(plugin) = scroll_trigger.as_ref() {
            if call_method(&gsap, "registerPlugin", &Array::of1(plugin)).is_err() {
                logger.warn("gsap_plugin_register_failed", json!({ "plugin": "ScrollTrigger" }));
            }
        }
        Some(Self {
            gsap,
            scroll_trigger,
            logger,
        })
    }

    fn call(&self, method: &str, args: &Array) {
        if call_method(&self.gsap, method, args).is_err() {
            self.logger
                .warn("animation_call_failed", json!({ "engine": "gsap", "method": method }));
        }
    }
}

impl Animator<Element> for GsapAnimator {
    fn is_active(&self) -> bool {
        true
    }

    fn from_to(&self, targets: &[Element], from: &Pose, tween: &Tween) {
        self.call(
            "fromTo",
            &Array::of3(&element_array(targets), &pose_object(from), &tween_object(tween)),
        );
    }

    fn to(&self, targets: &[Element], tween: &Tween) {
        self.call("to", &Array::of2(&element_array(targets), &tween_object(tween)));
    }

    fn parallax(&self, target: &Element, y_percent: f64) {
        if self.scroll_trigger.is_none() {
            return;
        }
        let trigger = Object::new();
        set(&trigger, "trigger", target.clone());
        set(&trigger, "start", "top bottom");
        set(&trigger, "end", "bottom top");
        set(&trigger, "scrub", true);

        let vars = Object::new();
        set(&vars, "yPercent", y_percent);
        set(&vars, "ease", Ease::None.as_str());
        set(&vars, "scrollTrigger", trigger);

        self.call("to", &Array::of2(target, &vars));
    }

    fn yoyo_forever(&self, targets: &[Element], tween: &Tween) {
        let vars = tween_object(&Tween {
            stagger: 0.0,
            ..*tween
        });
        set(&vars, "yoyo", true);
        set(&vars, "repeat", -1);
        if tween.stagger > 0.0 {
            let stagger = Object::new();
            set(&stagger, "each", tween.stagger);
            set(&stagger, "from", "random");
            set(&vars, "stagger", stagger);
        }

        self.call("to", &Array::of2(&element_array(targets), &vars));
    }
}

pub struct LenisScroll {
    lenis: JsValue,
    logger: Logger,
}

impl LenisScroll {
    fn detect(logger: Logger) -> Option<Self> {
        let constructor = global("Lenis")?.dyn_into::<Function>().ok()?;

        let options = Object::new();
        set(&options, "duration", 1.2);
        set(
            &options,
            "easing",
            Function::new_with_args("t", "return Math.min(1, 1.001 - Math.pow(2, -10 * t));"),
        );
        set(&options, "direction", "vertical");
        set(&options, "gestureDirection", "vertical");
        set(&options, "smooth", true);
        set(&options, "mouseMultiplier", 1.0);
        set(&options, "smoothTouch", false);
        set(&options, "touchMultiplier", 2.0);
        set(&options, "infinite", false);

        let lenis = Reflect::construct(&constructor, &Array::of1(&options)).ok()?;

        if let Some(update) = global("ScrollTrigger")
            .and_then(|plugin| Reflect::get(&plugin, &JsValue::from_str("update")).ok())
        {
            let _ = call_method(&lenis, "on", &Array::of2(&JsValue::from_str("scroll"), &update));
        }

        let driver = lenis.clone();
        run_frame_loop(move |time| {
            let _ = call_method(&driver, "raf", &Array::of1(&JsValue::from_f64(time)));
            true
        });

        Some(Self { lenis, logger })
    }
}

impl ScrollEngine<Element> for LenisScroll {
    fn scroll_to(&self, target: &Element, request: ScrollRequest) {
        let options = Object::new();
        set(&options, "offset", request.offset);
        set(&options, "duration", request.duration_secs);

        if call_method(&self.lenis, "scrollTo", &Array::of2(target, &options)).is_err() {
            self.logger
                .warn("scroll_call_failed", json!({ "engine": "lenis", "target": target.id() }));
        }
    }
}

/// Platform scrolling. With native smooth scrolling the header offset is not
/// applied; the frame-driven path does apply it.
pub struct NativeScroll {
    smooth_supported: bool,
    offset: f64,
    duration_ms: f64,
}

impl NativeScroll {
    fn new(config: &SiteConfig) -> Self {
        let smooth_supported = window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .and_then(|root| root.dyn_into::<HtmlElement>().ok())
            .map(|root| {
                Reflect::has(&root.style(), &JsValue::from_str("scrollBehavior")).unwrap_or(false)
            })
            .unwrap_or(false);

        Self {
            smooth_supported,
            offset: config.scroll_offset_px,
            duration_ms: config.native_scroll_duration_ms as f64,
        }
    }
}

impl ScrollEngine<Element> for NativeScroll {
    fn scroll_to(&self, target: &Element, _request: ScrollRequest) {
        if self.smooth_supported {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
            return;
        }

        let Some(win) = window() else {
            return;
        };
        let mut animation =
            ScrollAnimation::new(scroll_y(), element_top(target), self.offset, self.duration_ms);
        run_frame_loop(move |now| {
            let frame = animation.frame(now);
            win.scroll_to_with_x_and_y(0.0, frame.y);
            !frame.done
        });
    }
}

pub struct TypedEffect {
    constructor: Function,
    instance: RefCell<Option<JsValue>>,
    logger: Logger,
}

impl TypedEffect {
    fn detect(logger: Logger) -> Option<Self> {
        let constructor = global("Typed")?.dyn_into::<Function>().ok()?;
        Some(Self {
            constructor,
            instance: RefCell::new(None),
            logger,
        })
    }
}

impl TypingEngine<Element> for TypedEffect {
    fn start(&self, target: &Element, phrases: &[String]) {
        TypingEngine::<Element>::stop(self);

        let strings: Array = phrases.iter().map(|phrase| JsValue::from_str(phrase)).collect();
        let options = Object::new();
        set(&options, "strings", strings);
        set(&options, "typeSpeed", 60);
        set(&options, "backSpeed", 40);
        set(&options, "backDelay", 2500);
        set(&options, "loop", true);
        set(&options, "showCursor", true);
        set(&options, "cursorChar", "|");
        set(&options, "smartBackspace", true);

        match Reflect::construct(&self.constructor, &Array::of2(target, &options)) {
            Ok(instance) => {
                self.instance.replace(Some(instance));
            }
            Err(_) => self.logger.warn("typing_start_failed", json!({ "engine": "typed" })),
        }
    }

    fn stop(&self) {
        if let Some(instance) = self.instance.borrow_mut().take() {
            let _ = call_method(&instance, "destroy", &Array::new());
        }
    }
}

/// Without a typing engine the first phrase is shown as plain text.
pub struct StaticPhrase;

impl TypingEngine<Element> for StaticPhrase {
    fn start(&self, target: &Element, phrases: &[String]) {
        target.set_text_content(phrases.first().map(String::as_str));
    }

    fn stop(&self) {}
}

pub struct Confetti {
    confetti: Function,
}

impl Celebration for Confetti {
    fn burst(&self) {
        let origin = Object::new();
        set(&origin, "y", 0.6);

        let options = Object::new();
        set(&options, "particleCount", 100);
        set(&options, "spread", 70);
        set(&options, "origin", origin);

        let _ = self.confetti.call1(&JsValue::NULL, &options);
    }
}

#[derive(Clone)]
pub struct Engines {
    pub scroll: Rc<dyn ScrollEngine<Element>>,
    pub animator: Rc<dyn Animator<Element>>,
    pub typing: Rc<dyn TypingEngine<Element>>,
    pub celebration: Rc<dyn Celebration>,
}

impl Engines {
    pub fn detect(config: &SiteConfig, reduced_motion: bool, logger: Logger) -> Self {
        let lenis = if reduced_motion {
            None
        } else {
            LenisScroll::detect(logger)
        };
        let gsap = GsapAnimator::detect(logger);
        let typed = TypedEffect::detect(logger);
        let confetti = if reduced_motion {
            None
        } else {
            global("confetti").and_then(|value| value.dyn_into::<Function>().ok())
        };

        logger.info(
            "engines_detected",
            json!({
                "lenis": lenis.is_some(),
                "gsap": gsap.is_some(),
                "typed": typed.is_some(),
                "confetti": confetti.is_some(),
                "reduced_motion": reduced_motion,
            }),
        );

        let scroll: Rc<dyn ScrollEngine<Element>> = match lenis {
            Some(lenis) => Rc::new(lenis),
            None => Rc::new(NativeScroll::new(config)),
        };
        let animator: Rc<dyn Animator<Element>> = match gsap {
            Some(gsap) => Rc::new(gsap),
            None => Rc::new(NoAnimation),
        };
        let typing: Rc<dyn TypingEngine<Element>> = match typed {
            Some(typed) => Rc::new(typed),
            None => Rc::new(StaticPhrase),
        };
        let celebration: Rc<dyn Celebration> = match confetti {
            Some(confetti) => Rc::new(Confetti { confetti }),
            None => Rc::new(NoCelebration),
        };

        Self {
            scroll,
            animator,
            typing,
            celebration,
        }
    }
}
