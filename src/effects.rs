use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::Array;
use showcase::config::MotionConfig;
use showcase::counter::{parse_target, Counter};
use showcase::cursor::{tilt_for, CursorFollower, Point};
use showcase::frame::{FrameGate, TaskState};
use showcase::motion::{self, HeroTweens, Region, ScrollState};
use showcase::reveal::{marker_class, RevealTracker};
use showcase::role::{Role, ROLE_ATTRIBUTE, ROLE_SELECTOR};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Window,
};

const REVEAL_SELECTOR: &str = "[data-reveal], [data-target]";
const REVEAL_KEY_ATTRIBUTE: &str = "data-reveal-key";
const TILT_SELECTOR: &str = "[data-role=\"tilt\"]";
const TILT_CLASS: &str = "tilt-effect";

type Shared = Rc<RefCell<Controller>>;
type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;
type FrameStep = Rc<RefCell<Box<dyn FnMut(f64) -> bool>>>;

/// A self-rescheduling animation-frame loop. Runs until its step returns
/// `false` or it is cancelled.
struct FrameLoop {
    state: Rc<RefCell<TaskState>>,
    handle: FrameSlot,
}

impl FrameLoop {
    fn start(step: impl FnMut(f64) -> bool + 'static) -> Self {
        let frame_loop = Self {
            state: Rc::new(RefCell::new(TaskState::default())),
            handle: Rc::new(RefCell::new(None)),
        };
        frame_loop.state.borrow_mut().start();

        let step: FrameStep = Rc::new(RefCell::new(Box::new(step)));
        schedule_frame(frame_loop.state.clone(), frame_loop.handle.clone(), step);
        frame_loop
    }

    fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    fn cancel(&self) {
        self.state.borrow_mut().cancel();
        self.handle.borrow_mut().take();
    }
}

fn schedule_frame(state: Rc<RefCell<TaskState>>, handle: FrameSlot, step: FrameStep) {
    let next_handle = handle.clone();
    let frame = request_animation_frame(move |timestamp| {
        if !state.borrow_mut().tick() {
            return;
        }

        let keep_going = (&mut *step.borrow_mut())(timestamp);
        if keep_going {
            schedule_frame(state, next_handle, step);
        } else {
            state.borrow_mut().finish();
        }
    });
    *handle.borrow_mut() = Some(frame);
}

struct Controller {
    config: MotionConfig,
    gate: FrameGate,
    cursor: CursorFollower,
    reveal: RevealTracker<u32>,
    geometry_reveal: bool,
    tilted: Option<Element>,
    counters: Vec<FrameLoop>,
}

impl Controller {
    fn new(config: MotionConfig) -> Self {
        Self {
            config,
            gate: FrameGate::default(),
            cursor: CursorFollower::new(config.cursor_easing),
            reveal: RevealTracker::new(config.reveal),
            geometry_reveal: false,
            tilted: None,
            counters: Vec::new(),
        }
    }

    fn update_tilt(&mut self, host: Option<Element>, pointer: Point) {
        if let Some(previous) = self.tilted.take() {
            if host.as_ref() != Some(&previous) {
                clear_transform(&previous);
            }
        }

        let Some(host) = host else {
            return;
        };
        let rect = host.get_bounding_client_rect();
        let tilt = tilt_for(
            pointer,
            Point::new(rect.left(), rect.top()),
            rect.width(),
            rect.height(),
            self.config.tilt_max_degrees,
        );
        if let Some(element) = host.dyn_ref::<HtmlElement>() {
            set_style(element, "transform", &tilt.transform());
        }
        self.tilted = Some(host);
    }

    fn clear_tilt(&mut self) {
        if let Some(previous) = self.tilted.take() {
            clear_transform(&previous);
        }
    }
}

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    fn install(targets: &[Element], controller: &Shared) -> Option<Self> {
        let options = controller.borrow().reveal.options();
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin());

        let callback_controller = controller.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(key) = reveal_key(&target) else {
                        continue;
                    };

                    let revealed = callback_controller
                        .borrow_mut()
                        .reveal
                        .observe_entry(key, entry.is_intersecting());
                    if revealed {
                        observer.unobserve(&target);
                        on_revealed(&callback_controller, &target);
                    }
                }
            },
        );

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .ok()?;
        for target in targets {
            observer.observe(target);
        }

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Scroll, pointer and reveal effects for the mounted page. Dropping it
/// stops every loop and removes every listener.
pub struct Effects {
    controller: Shared,
    scroll_frame: FrameSlot,
    cursor_loop: Option<FrameLoop>,
    _observer: Option<RevealObserver>,
    _listeners: Vec<EventListener>,
}

impl Effects {
    pub fn install(config: MotionConfig) -> Option<Self> {
        let window = window()?;
        let document = window.document()?;
        let controller: Shared = Rc::new(RefCell::new(Controller::new(config)));
        let scroll_frame: FrameSlot = Rc::new(RefCell::new(None));
        let mut listeners = Vec::new();

        for element in elements(&document, TILT_SELECTOR) {
            let _ = element.class_list().add_1(TILT_CLASS);
        }

        let targets = tag_reveal_targets(&document);
        let observer = if targets.is_empty() {
            None
        } else {
            RevealObserver::install(&targets, &controller)
        };
        controller.borrow_mut().geometry_reveal = !targets.is_empty() && observer.is_none();

        for event in ["scroll", "resize"] {
            let controller = controller.clone();
            let scroll_frame = scroll_frame.clone();
            listeners.push(EventListener::new(&window, event, move |_| {
                request_sample(&controller, &scroll_frame);
            }));
        }

        listeners.extend(pointer_listeners(&document, &controller));

        let cursor_loop = html_element(&document, ".cursor")
            .map(|cursor| start_cursor_loop(controller.clone(), cursor));

        sample(&controller);

        Some(Self {
            controller,
            scroll_frame,
            cursor_loop,
            _observer: observer,
            _listeners: listeners,
        })
    }
}

impl Drop for Effects {
    fn drop(&mut self) {
        if let Some(cursor_loop) = self.cursor_loop.as_ref() {
            cursor_loop.cancel();
        }
        self.scroll_frame.borrow_mut().take();

        let mut controller = self.controller.borrow_mut();
        for counter in controller.counters.drain(..) {
            counter.cancel();
        }
        controller.clear_tilt();
    }
}

fn pointer_listeners(document: &Document, controller: &Shared) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    {
        let controller = controller.clone();
        listeners.push(EventListener::new(document, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            let tilt_host = role_target(event)
                .filter(|(role, _)| role.tilts())
                .map(|(_, host)| host);

            let mut controller = controller.borrow_mut();
            controller.cursor.move_to(pointer.x, pointer.y);
            controller.update_tilt(tilt_host, pointer);
        }));
    }

    {
        let controller = controller.clone();
        listeners.push(EventListener::new(document, "mouseover", move |event| {
            let hovering = role_target(event).is_some();
            controller.borrow_mut().cursor.set_hovering(hovering);
        }));
    }

    {
        let controller = controller.clone();
        listeners.push(EventListener::new(document, "mousedown", move |event| {
            let pressed = role_target(event).is_some();
            controller.borrow_mut().cursor.set_pressed(pressed);
        }));
    }

    {
        let controller = controller.clone();
        listeners.push(EventListener::new(document, "mouseup", move |_| {
            controller.borrow_mut().cursor.set_pressed(false);
        }));
    }

    if let Some(root) = document.document_element() {
        {
            let controller = controller.clone();
            listeners.push(EventListener::new(&root, "mouseleave", move |_| {
                let mut controller = controller.borrow_mut();
                controller.cursor.leave_viewport();
                controller.clear_tilt();
            }));
        }

        let controller = controller.clone();
        listeners.push(EventListener::new(&root, "mouseenter", move |_| {
            controller.borrow_mut().cursor.enter_viewport();
        }));
    }

    listeners
}

fn role_target(event: &Event) -> Option<(Role, Element)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let host = target.closest(ROLE_SELECTOR).ok().flatten()?;
    let role = Role::parse(&host.get_attribute(ROLE_ATTRIBUTE)?)?;
    Some((role, host))
}

fn start_cursor_loop(controller: Shared, cursor: HtmlElement) -> FrameLoop {
    FrameLoop::start(move |_| {
        let mut controller = controller.borrow_mut();
        controller.cursor.step();

        set_style(&cursor, "transform", &controller.cursor.transform());
        set_style(&cursor, "opacity", &controller.cursor.opacity().to_string());
        let classes = cursor.class_list();
        let _ = classes.toggle_with_force("hover", controller.cursor.is_hovering());
        let _ = classes.toggle_with_force("click", controller.cursor.is_pressed());
        true
    })
}

fn request_sample(controller: &Shared, scroll_frame: &FrameSlot) {
    if !controller.borrow_mut().gate.request() {
        return;
    }

    let frame_controller = controller.clone();
    let frame_slot = scroll_frame.clone();
    let frame = request_animation_frame(move |_| {
        frame_slot.borrow_mut().take();
        frame_controller.borrow_mut().gate.begin_frame();
        sample(&frame_controller);
    });
    *scroll_frame.borrow_mut() = Some(frame);
}

fn sample(controller: &Shared) {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(scroll) = read_scroll_state(&window, &document) else {
        return;
    };
    let (config, geometry_reveal) = {
        let controller = controller.borrow();
        (controller.config, controller.geometry_reveal)
    };

    apply_progress_bar(&document, &scroll);
    apply_nav_state(&document, &scroll, config.nav_scrolled_offset);
    apply_hero(&document, &scroll, &config.hero);
    apply_parallax(&document, &scroll);
    apply_timeline(&document, &scroll);

    if geometry_reveal {
        reveal_by_geometry(controller, &document, scroll.viewport_height);
    }
}

fn read_scroll_state(window: &Window, document: &Document) -> Option<ScrollState> {
    let offset = window.scroll_y().ok()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    let document_height = document
        .document_element()
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(viewport_height);

    Some(ScrollState {
        offset,
        document_height,
        viewport_height,
    })
}

fn apply_progress_bar(document: &Document, scroll: &ScrollState) {
    if let Some(bar) = html_element(document, ".scroll-progress") {
        set_style(&bar, "width", &motion::percent(scroll.page_progress()));
    }
}

fn apply_nav_state(document: &Document, scroll: &ScrollState, threshold: f64) {
    if let Some(nav) = document.query_selector(".site-nav").ok().flatten() {
        let _ = nav
            .class_list()
            .toggle_with_force("scrolled", scroll.is_scrolled(threshold));
    }
}

fn apply_hero(document: &Document, scroll: &ScrollState, tweens: &HeroTweens) {
    let Some(hero) = html_element(document, ".hero") else {
        return;
    };
    let Some(content) = html_element(document, ".hero-content") else {
        return;
    };

    let region = Region::new(f64::from(hero.offset_top()), f64::from(hero.offset_height()));
    let frame = tweens.frame(region.regime(scroll.offset));
    set_style(&content, "transform", &frame.transform());
    set_style(&content, "opacity", &frame.opacity());
}

fn apply_parallax(document: &Document, scroll: &ScrollState) {
    for element in elements(document, "[data-speed]") {
        let Some(speed) = motion::parse_speed(element.get_attribute("data-speed").as_deref())
        else {
            continue;
        };
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            let shift = motion::parallax_offset(scroll.offset, speed);
            set_style(element, "transform", &format!("translate3d(0, {shift:.2}px, 0)"));
        }
    }
}

fn apply_timeline(document: &Document, scroll: &ScrollState) {
    let Some(timeline) = document.query_selector(".timeline").ok().flatten() else {
        return;
    };

    let rect = timeline.get_bounding_client_rect();
    let fill = motion::timeline_fill(rect.top(), rect.height(), scroll.viewport_height);
    if let Some(progress) = html_element(document, ".timeline-progress") {
        set_style(&progress, "height", &motion::percent(fill));
    }

    for item in elements(document, ".timeline-item") {
        let top = item.get_bounding_client_rect().top();
        let _ = item
            .class_list()
            .toggle_with_force("highlighted", motion::is_highlighted(top, scroll.viewport_height));
    }
}

fn reveal_by_geometry(controller: &Shared, document: &Document, viewport_height: f64) {
    let mut revealed = Vec::new();

    {
        let mut controller = controller.borrow_mut();
        for element in elements(document, REVEAL_SELECTOR) {
            let Some(key) = reveal_key(&element) else {
                continue;
            };
            if controller.reveal.is_revealed(&key) {
                continue;
            }

            let rect = element.get_bounding_client_rect();
            if controller
                .reveal
                .observe_rect(key, rect.top(), rect.bottom(), viewport_height)
            {
                revealed.push(element);
            }
        }
    }

    for element in revealed {
        on_revealed(controller, &element);
    }
}

fn on_revealed(controller: &Shared, element: &Element) {
    let reveal_attribute = element.get_attribute("data-reveal");
    let _ = element
        .class_list()
        .add_1(marker_class(reveal_attribute.as_deref()));

    if let Some(target) = parse_target(element.get_attribute("data-target").as_deref()) {
        start_counter(controller, element.clone(), target);
    }
}

fn start_counter(controller: &Shared, element: Element, target: u64) {
    let duration_ms = controller.borrow().config.counter_duration_ms;
    let mut counter = Counter::new(target, duration_ms);

    let counter_loop = FrameLoop::start(move |timestamp| {
        let frame = counter.sample(timestamp);
        element.set_text_content(Some(&frame.value.to_string()));
        !frame.done
    });

    let mut controller = controller.borrow_mut();
    controller.counters.retain(FrameLoop::is_running);
    controller.counters.push(counter_loop);
}

fn tag_reveal_targets(document: &Document) -> Vec<Element> {
    let targets = elements(document, REVEAL_SELECTOR);
    for (index, target) in targets.iter().enumerate() {
        let _ = target.set_attribute(REVEAL_KEY_ATTRIBUTE, &index.to_string());
    }
    targets
}

fn reveal_key(element: &Element) -> Option<u32> {
    element.get_attribute(REVEAL_KEY_ATTRIBUTE)?.parse().ok()
}

fn elements(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn html_element(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn clear_transform(element: &Element) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().remove_property("transform");
    }
}
