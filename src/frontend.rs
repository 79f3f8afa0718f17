use crate::effects::Effects;
use js_sys::{Function, Reflect};
use showcase::accordion::Accordion;
use showcase::config::MotionConfig;
use showcase::theme::{
    MemoryStorage, PreferenceError, PreferenceStorage, Theme, ThemeStore, DARK_MODE_CLASS,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{console, window, Event, Storage};
use yew::prelude::*;

const MOUNT_ID: &str = "app";

const SERVICES: &[(&str, &str)] = &[
    (
        "Brand systems",
        "Identity, type and colour foundations that hold up from favicon to billboard.",
    ),
    (
        "Product design",
        "Research-led interface work, prototyped in code and tested with real users.",
    ),
    (
        "Web engineering",
        "Fast, accessible sites built on static hosting with progressive enhancement.",
    ),
];

const STATS: &[(u64, &str)] = &[
    (120, "projects shipped"),
    (48, "brands launched"),
    (12, "years in practice"),
];

const MILESTONES: &[(&str, &str)] = &[
    ("2014", "Studio founded as a two-person practice."),
    ("2018", "First national rebrand and a move into product work."),
    ("2021", "Engineering team formed around web performance."),
    ("2025", "Design systems practice for public-sector clients."),
];

const WORK: &[(&str, &str)] = &[
    ("Harbour Transit", "Wayfinding and live departures for a coastal network."),
    ("Northfield Library", "Catalogue redesign serving 40 branches."),
    ("Oak & Ember", "E-commerce identity for an independent roastery."),
];

enum BrowserStorage {
    Local(Storage),
    Session(MemoryStorage),
}

impl PreferenceStorage for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(storage) => storage.get_item(key).ok().flatten(),
            Self::Session(storage) => storage.read(key),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        match self {
            Self::Local(storage) => storage
                .set_item(key, value)
                .map_err(|err| PreferenceError::Rejected(format!("{err:?}"))),
            Self::Session(storage) => storage.write(key, value),
        }
    }
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn browser_storage() -> BrowserStorage {
    local_storage()
        .map(BrowserStorage::Local)
        .unwrap_or_else(|| BrowserStorage::Session(MemoryStorage::default()))
}

fn apply_theme(theme: Theme) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body
            .class_list()
            .toggle_with_force(DARK_MODE_CLASS, theme.is_dark());
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || {
        apply_theme(theme);
    });

    if start_view_transition
        .call1(&document_js, &callback)
        .is_err()
    {
        apply_theme(theme);
    }
}

fn motion_config() -> MotionConfig {
    let mount = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ID));

    match mount {
        Some(mount) => MotionConfig::from_attributes(|name| mount.get_attribute(name)),
        None => MotionConfig::default(),
    }
}

#[derive(Properties, PartialEq)]
struct ServiceCardProps {
    index: usize,
    title: AttrValue,
    detail: AttrValue,
    open: bool,
    on_toggle: Callback<usize>,
}

#[function_component(ServiceCard)]
fn service_card(props: &ServiceCardProps) -> Html {
    let onclick = {
        let index = props.index;
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_| on_toggle.emit(index))
    };
    let panel_id = format!("service-panel-{}", props.index);

    html! {
        <article class={classes!("service", "accordion", props.open.then_some("active"))}>
            <button
                class="accordion-header"
                type="button"
                data-role="interactive"
                aria-expanded={props.open.to_string()}
                aria-controls={panel_id.clone()}
                {onclick}
            >
                <h3>{props.title.clone()}</h3>
                <span class="accordion-icon" aria-hidden="true">{"+"}</span>
            </button>
            <div class="accordion-body" id={panel_id}>
                <p>{props.detail.clone()}</p>
            </div>
        </article>
    }
}

#[function_component(App)]
fn app() -> Html {
    let store = use_mut_ref(|| ThemeStore::load(browser_storage()));
    let theme = use_state(|| store.borrow().current());
    let accordion = use_state(Accordion::default);
    let video_failed = use_state(|| false);

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    use_effect_with((), |_| {
        let effects = Effects::install(motion_config());
        move || drop(effects)
    });

    let on_toggle_theme = {
        let store = store.clone();
        let theme = theme.clone();
        Callback::from(move |_| {
            let toggled = store.borrow_mut().toggle();
            match toggled {
                Ok(next) => {
                    apply_theme_with_transition(next);
                    theme.set(next);
                }
                Err(err) => {
                    console::warn_1(&JsValue::from_str(&format!("theme not saved: {err}")));
                }
            }
        })
    };

    let on_toggle_service = {
        let accordion = accordion.clone();
        Callback::from(move |index: usize| accordion.set((*accordion).toggled(index)))
    };

    let on_video_error = {
        let video_failed = video_failed.clone();
        Callback::from(move |_: Event| video_failed.set(true))
    };

    html! {
        <>
            <div class="cursor" aria-hidden="true"></div>
            <div class="scroll-progress" aria-hidden="true"></div>

            <nav class="site-nav" aria-label="Primary">
                <a class="brand" href="#top" data-role="interactive">{"Fieldwork Studio"}</a>
                <ul class="nav-links">
                    <li><a href="#services" data-role="interactive">{"Services"}</a></li>
                    <li><a href="#work" data-role="interactive">{"Work"}</a></li>
                    <li><a href="#story" data-role="interactive">{"Story"}</a></li>
                </ul>
                <button
                    class="theme-toggle"
                    type="button"
                    data-role="interactive"
                    aria-label={(*theme).toggle_label()}
                    aria-pressed={(*theme).is_dark().to_string()}
                    onclick={on_toggle_theme}
                >
                    <span aria-hidden="true">{(*theme).icon()}</span>
                </button>
            </nav>

            <main id="content">
                <section class="hero" id="top">
                    <div class="hero-orb" data-speed="0.35" aria-hidden="true"></div>
                    <div class="hero-content">
                        <h1>{"Design and engineering for brands that move."}</h1>
                        <p>{"An independent studio shaping identities, products and the sites that carry them."}</p>
                        <a class="cta" href="#work" data-role="interactive">{"See the work"}</a>
                    </div>
                </section>

                <section id="services" class="section-block" data-reveal="section-visible" aria-labelledby="services-heading">
                    <h2 id="services-heading">{"Services"}</h2>
                    <div class="services">
                        { for SERVICES.iter().enumerate().map(|(index, (title, detail))| html! {
                            <ServiceCard
                                key={index}
                                {index}
                                title={*title}
                                detail={*detail}
                                open={accordion.is_open(index)}
                                on_toggle={on_toggle_service.clone()}
                            />
                        }) }
                    </div>
                </section>

                <section class="section-block stats" data-reveal="section-visible" aria-label="Studio in numbers">
                    { for STATS.iter().map(|(target, label)| html! {
                        <div class="stat" data-reveal="">
                            <span class="stat-number" data-target={target.to_string()}>{"0"}</span>
                            <span class="stat-label">{*label}</span>
                        </div>
                    }) }
                </section>

                <section id="work" class="section-block" data-reveal="section-visible" aria-labelledby="work-heading">
                    <h2 id="work-heading">{"Selected work"}</h2>
                    <div class="work-grid">
                        { for WORK.iter().map(|(title, summary)| html! {
                            <article class="work-card" data-role="tilt" data-reveal="">
                                <h3>{*title}</h3>
                                <p>{*summary}</p>
                            </article>
                        }) }
                    </div>
                </section>

                <section class="section-block reel" data-reveal="section-visible" aria-labelledby="reel-heading">
                    <h2 id="reel-heading">{"Showreel"}</h2>
                    <video
                        class="showcase-video"
                        src="/media/reel.mp4"
                        muted="muted"
                        autoplay="autoplay"
                        loop="loop"
                        playsinline="playsinline"
                        onerror={on_video_error}
                    />
                    <p class={classes!("video-fallback", (*video_failed).then_some("is-visible"))} role="status">
                        {"The showreel could not be loaded. Browse the selected work above instead."}
                    </p>
                </section>

                <section id="story" class="section-block" data-reveal="section-visible" aria-labelledby="story-heading">
                    <h2 id="story-heading">{"Story"}</h2>
                    <div class="timeline">
                        <div class="timeline-progress" aria-hidden="true"></div>
                        <ol>
                            { for MILESTONES.iter().map(|(year, text)| html! {
                                <li class="timeline-item" data-reveal="">
                                    <span class="timeline-year">{*year}</span>
                                    <p>{*text}</p>
                                </li>
                            }) }
                        </ol>
                    </div>
                </section>
            </main>

            <footer class="site-footer">
                <p>{"Fieldwork Studio"}</p>
                <a href="mailto:hello@fieldwork.studio" data-role="interactive">{"hello@fieldwork.studio"}</a>
            </footer>
        </>
    }
}

pub fn run() {
    console::info_1(&JsValue::from_str("showcase: mounting page"));

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(MOUNT_ID))
            .expect("missing #app mount point"),
    )
    .render();
}
