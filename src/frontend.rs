use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::future::TimeoutFuture;
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Element, EventTarget, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent,
};
use yew::prelude::*;

use crate::bridge::{prefers_reduced_motion, Engines};
use crate::config::SiteConfig;
use crate::dom::Behaviors;
use crate::form::{
    submit_contact, ContactForm, ContactMessage, FieldId, FieldKind, FieldState, SubmitError,
};
use crate::i18n::{fetch_dictionary, load_translations, Language, Translations};
use crate::logging::Logger;
use crate::palette::{PaletteEffect, PaletteEntry, PaletteEvent, PaletteState, SECTIONS};
use crate::preferences::{
    apply_language, apply_theme, apply_theme_with_transition, LocalStore, Preferences,
};
use crate::scroll::ScrollRequest;

const OWNER: &str = "Ignacio Díaz Nieto";

const SKILL_BARS: [(&str, &str, u8); 4] = [
    ("softwareDev", "development", 90),
    ("linuxShell", "systems", 85),
    ("networksSecurity", "security", 75),
    ("agileJira", "development", 80),
];

const SKILL_FILTERS: [(&str, &str); 3] = [
    ("development", "softwareDev"),
    ("systems", "linuxShell"),
    ("security", "networksSecurity"),
];

const LANGUAGE_BARS: [(&str, u8); 4] = [
    ("spanish", 100),
    ("english", 90),
    ("french", 60),
    ("chinese", 40),
];

const COUNTERS: [(&str, &str, &str); 3] = [
    ("3", "0+", "yearsExperience"),
    ("10", "0+", "projectsShipped"),
    ("4", "0", "languagesSpoken"),
];

const JOBS: [(&str, &str); 3] = [
    ("softwareEngineerIndra", "indraDescription"),
    ("internMediaset", "mediasetDescription"),
    ("privateTutor", "tutorDescription"),
];

const EDUCATION: [&str; 3] = ["bscComputer", "masterCyber", "academicMobility"];

const CERTIFICATIONS: [(&str, &str); 3] = [
    ("googleActivate", "completed"),
    ("ecommerceMarketing", "completed"),
    ("cyberFundamentals", "inProgress"),
];

struct Project {
    title: &'static str,
    role: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
    metrics: &'static [(&'static str, &'static str)],
}

const PROJECTS: [Project; 2] = [
    Project {
        title: "Sofía",
        role: "leadDev",
        description: "sofiaDescription",
        tags: &["performanceOpt", "responsiveLayout", "customAnimations"],
        metrics: &[("95+", "Lighthouse"), ("<1s", "loadTime"), ("100%", "responsive")],
    },
    Project {
        title: "Otto",
        role: "fullStackDev",
        description: "ottoDescription",
        tags: &["brandSystem", "componentLib", "analytics", "deployPipeline"],
        metrics: &[("<2s", "fastLoad"), ("40+", "components")],
    },
];

struct Shared {
    config: SiteConfig,
    logger: Logger,
    translations: Translations,
    engines: Engines,
    reduced_motion: bool,
}

/// Everything resolved once at startup: config, logger, loaded translations
/// and the detected engines.
#[derive(Clone)]
pub struct AppContext {
    shared: Rc<Shared>,
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl AppContext {
    fn new(config: SiteConfig, logger: Logger, translations: Translations) -> Self {
        let reduced_motion = prefers_reduced_motion();
        let engines = Engines::detect(&config, reduced_motion, logger);
        Self {
            shared: Rc::new(Shared {
                config,
                logger,
                translations,
                engines,
                reduced_motion,
            }),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.shared.config
    }

    pub fn logger(&self) -> Logger {
        self.shared.logger
    }

    pub fn translations(&self) -> &Translations {
        &self.shared.translations
    }

    pub fn engines(&self) -> &Engines {
        &self.shared.engines
    }

    pub fn reduced_motion(&self) -> bool {
        self.shared.reduced_motion
    }

    /// Returns false when no element carries `id`.
    pub fn scroll_to_id(&self, id: &str) -> bool {
        let Some(target) = window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            self.logger().debug("scroll_target_missing", json!({ "id": id }));
            return false;
        };
        self.engines()
            .scroll
            .scroll_to(&target, ScrollRequest::for_engine(self.config()));
        true
    }
}

#[derive(Clone, PartialEq)]
struct Locale {
    context: AppContext,
    language: Language,
}

impl Locale {
    fn t(&self, key: &str) -> String {
        self.context
            .translations()
            .text(self.language, key)
            .to_string()
    }
}

fn palette_entries(locale: &Locale) -> Vec<PaletteEntry> {
    SECTIONS
        .iter()
        .map(|section| PaletteEntry {
            label: locale.t(section.id),
            id: section.id,
        })
        .collect()
}

#[derive(Properties, PartialEq)]
struct LocaleProps {
    locale: Locale,
}

#[function_component(CommandPalette)]
fn command_palette(props: &LocaleProps) -> Html {
    let state = {
        let locale = props.locale.clone();
        use_mut_ref(move || PaletteState::new(palette_entries(&locale)))
    };
    let redraw = use_force_update();
    let overlay_ref = use_node_ref();
    let input_ref = use_node_ref();

    let focus_input = {
        let input_ref = input_ref.clone();
        move || {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    };

    let dispatch = {
        let state = state.clone();
        let redraw = redraw.clone();
        let context = props.locale.context.clone();
        let focus_input = focus_input.clone();
        Callback::from(move |event: PaletteEvent| -> PaletteEffect {
            let effect = state.borrow_mut().apply(event);
            match effect {
                PaletteEffect::Ignored => {}
                PaletteEffect::FocusInput => {
                    redraw.force_update();
                    focus_input();
                }
                PaletteEffect::Navigate(id) => {
                    context.scroll_to_id(id);
                    redraw.force_update();
                }
                PaletteEffect::Updated | PaletteEffect::Closed => redraw.force_update(),
            }
            effect
        })
    };

    {
        let state = state.clone();
        let redraw = redraw.clone();
        let locale = props.locale.clone();
        use_effect_with(props.locale.language, move |_| {
            state.borrow_mut().relabel(palette_entries(&locale));
            redraw.force_update();
            || ()
        });
    }

    {
        let dispatch = dispatch.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new_with_options(
                    &win,
                    "keydown",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        let Some(palette_event) =
                            PaletteEvent::from_key(&key.key(), key.ctrl_key(), key.meta_key())
                        else {
                            return;
                        };
                        if dispatch.emit(palette_event).consumed() {
                            event.prevent_default();
                        }
                    },
                )
            });
            move || drop(listener)
        });
    }

    let palette = state.borrow();
    let visible = palette.is_visible();

    {
        use_effect_with(visible, move |visible| {
            if *visible {
                focus_input();
            }
            || ()
        });
    }

    let oninput = {
        let dispatch = dispatch.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                dispatch.emit(PaletteEvent::Input(input.value()));
            }
        })
    };

    let on_backdrop = {
        let dispatch = dispatch.clone();
        let overlay_ref = overlay_ref.clone();
        Callback::from(move |event: MouseEvent| {
            let overlay: Option<EventTarget> = overlay_ref.get().map(Into::into);
            if overlay.is_some() && event.target() == overlay {
                dispatch.emit(PaletteEvent::ClickBackdrop);
            }
        })
    };

    let active_option = palette
        .selected_entry()
        .map(|entry| format!("palette-option-{}", entry.id));

    let results: Html = if palette.result_count() == 0 {
        html! { <li class="palette-empty">{props.locale.t("paletteEmpty")}</li> }
    } else {
        palette
            .results()
            .enumerate()
            .map(|(index, entry)| {
                let onclick = {
                    let dispatch = dispatch.clone();
                    Callback::from(move |_: MouseEvent| {
                        dispatch.emit(PaletteEvent::ClickRow(index));
                    })
                };
                let selected = index == palette.selected_index();
                html! {
                    <li
                        id={format!("palette-option-{}", entry.id)}
                        class={classes!(selected.then_some("selected"))}
                        data-id={entry.id}
                        role="option"
                        aria-selected={selected.to_string()}
                        {onclick}
                    >
                        {entry.label.clone()}
                    </li>
                }
            })
            .collect()
    };

    html! {
        <div
            id="command-palette"
            ref={overlay_ref}
            class={classes!("command-palette", visible.then_some("show"))}
            aria-hidden={(!visible).to_string()}
            onclick={on_backdrop}
        >
            <div class="palette-content" role="dialog" aria-modal="true">
                <input
                    id="palette-input"
                    ref={input_ref}
                    type="text"
                    autocomplete="off"
                    placeholder={props.locale.t("palettePlaceholder")}
                    aria-controls="palette-results"
                    aria-activedescendant={active_option}
                    value={palette.query().to_string()}
                    {oninput}
                />
                <ul id="palette-results" role="listbox">{results}</ul>
            </div>
        </div>
    }
}

fn event_value(event: &InputEvent) -> String {
    if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
        return input.value();
    }
    event
        .target_dyn_into::<HtmlTextAreaElement>()
        .map(|area| area.value())
        .unwrap_or_default()
}

async fn simulate_delivery(
    message: ContactMessage,
    delay_ms: u64,
    logger: Logger,
) -> Result<(), SubmitError> {
    let payload = serde_json::to_string(&message).map_err(|_| SubmitError::Interrupted)?;
    logger.debug("contact_payload_ready", json!({ "bytes": payload.len() }));
    TimeoutFuture::new(u32::try_from(delay_ms).unwrap_or(u32::MAX)).await;
    Ok(())
}

fn form_field(
    locale: &Locale,
    id: FieldId,
    state: &FieldState,
    oninput: Callback<InputEvent>,
    onblur: Callback<FocusEvent>,
) -> Html {
    let name = id.as_str();
    let error = state
        .error
        .map(|error| locale.t(error.message_key()))
        .unwrap_or_default();

    let control = match (id, id.kind()) {
        (FieldId::Message, _) => html! {
            <textarea
                id={name}
                name={name}
                rows="5"
                value={state.value.clone()}
                {oninput}
                {onblur}
            />
        },
        (_, kind) => {
            let input_type = match kind {
                FieldKind::Email => "email",
                FieldKind::Text => "text",
            };
            html! {
                <input
                    id={name}
                    name={name}
                    type={input_type}
                    value={state.value.clone()}
                    {oninput}
                    {onblur}
                />
            }
        }
    };

    html! {
        <div class={classes!("form-group", state.error.is_some().then_some("error"))}>
            <label for={name}>{locale.t(id.label_key())}</label>
            {control}
            <span class={classes!("error-message", state.error.is_some().then_some("show"))}>
                {error}
            </span>
        </div>
    }
}

#[function_component(ContactFormView)]
fn contact_form_view(props: &LocaleProps) -> Html {
    let form = use_mut_ref(ContactForm::default);
    let redraw = use_force_update();

    let field_callbacks = |id: FieldId| {
        let oninput = {
            let form = form.clone();
            let redraw = redraw.clone();
            Callback::from(move |event: InputEvent| {
                form.borrow_mut().on_input(id, event_value(&event));
                redraw.force_update();
            })
        };
        let onblur = {
            let form = form.clone();
            let redraw = redraw.clone();
            Callback::from(move |_: FocusEvent| {
                form.borrow_mut().on_blur(id);
                redraw.force_update();
            })
        };
        (oninput, onblur)
    };

    let onsubmit = {
        let form = form.clone();
        let redraw = redraw.clone();
        let context = props.locale.context.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form = form.clone();
            let redraw = redraw.clone();
            let context = context.clone();
            spawn_local(async move {
                let logger = context.logger();
                let delay_ms = context.config().submit_delay_ms;
                let celebration = Rc::clone(&context.engines().celebration);
                submit_contact(
                    &form,
                    |message| simulate_delivery(message, delay_ms, logger),
                    |ms| TimeoutFuture::new(u32::try_from(ms).unwrap_or(u32::MAX)),
                    context.config().success_dismiss_ms,
                    |_| redraw.force_update(),
                    move || celebration.burst(),
                    &logger,
                )
                .await;
            });
        })
    };

    let current = form.borrow();
    let locale = &props.locale;
    let loading = current.is_loading();

    html! {
        <form id="contact-form" class="contact-form" novalidate={true} {onsubmit}>
            {for FieldId::ALL.iter().map(|id| {
                let (oninput, onblur) = field_callbacks(*id);
                form_field(locale, *id, current.field(*id), oninput, onblur)
            })}
            <button
                type="submit"
                class={classes!(
                    "btn",
                    "btn-primary",
                    "submit-btn",
                    "magnetic",
                    loading.then_some("loading")
                )}
                disabled={loading}
            >
                <span class="btn-text">
                    {if loading { locale.t("sending") } else { locale.t("sendMessage") }}
                </span>
            </button>
            <div
                id="form-success"
                class={classes!("form-success", current.success_visible().then_some("show"))}
                role="status"
            >
                {locale.t("messageSent")}
            </div>
        </form>
    }
}

fn site_header(
    locale: &Locale,
    preferences: &Preferences,
    on_theme: Callback<MouseEvent>,
    on_language: Callback<MouseEvent>,
) -> Html {
    html! {
        <header class="navbar">
            <a class="skip-link" href="#about">{locale.t("skipToContent")}</a>
            <nav class="nav-container">
                <a class="nav-logo" href="#about">{"IDN"}</a>
                <ul class="nav-menu">
                    {for SECTIONS.iter().map(|section| html! {
                        <li>
                            <a class="nav-link" href={format!("#{}", section.id)}>
                                {locale.t(section.id)}
                            </a>
                        </li>
                    })}
                </ul>
                <div class="nav-actions">
                    <button
                        class="lang-toggle"
                        type="button"
                        aria-label={locale.t("toggleLanguage")}
                        data-tooltip={locale.t("toggleLanguage")}
                        onclick={on_language}
                    >
                        {preferences.language.toggle_label()}
                    </button>
                    <button
                        class="theme-toggle"
                        type="button"
                        aria-label={locale.t("toggleTheme")}
                        aria-pressed={preferences.theme.pressed().to_string()}
                        data-tooltip={locale.t("toggleTheme")}
                        onclick={on_theme}
                    >
                        <span aria-hidden="true">{preferences.theme.icon()}</span>
                    </button>
                </div>
            </nav>
        </header>
    }
}

fn hero(locale: &Locale) -> Html {
    html! {
        <section class="hero">
            <div class="hero-shapes" aria-hidden="true">
                <span class="shape shape-1" data-parallax="0.2"></span>
                <span class="shape shape-2" data-parallax="0.4"></span>
            </div>
            <h1 class="hero-name" data-reveal="hero">{OWNER}</h1>
            <p class="hero-title" data-reveal="hero" data-delay="0.2">{locale.t("heroTitle")}</p>
            <p class="hero-typed" data-reveal="hero" data-delay="0.3">
                <span id="typed-text"></span>
            </p>
            <p class="hero-description" data-reveal="hero" data-delay="0.4">
                {locale.t("heroDescription")}
            </p>
            <div class="hero-actions" data-reveal="hero" data-delay="0.6">
                <a class="btn btn-primary magnetic" href="#contact">{locale.t("contactMe")}</a>
                <a class="btn magnetic" href="/cv.pdf" target="_blank" rel="noopener noreferrer">
                    {locale.t("viewCV")}
                </a>
                <a class="btn magnetic" href="#projects">{locale.t("viewProjects")}</a>
            </div>
        </section>
    }
}

fn skills(locale: &Locale) -> Html {
    html! {
        <div class="skills">
            <h3 data-reveal="fade">{locale.t("coreSkills")}</h3>
            <div class="filter-pills">
                <button class="filter-pill active" type="button" data-filter="all">
                    {locale.t("all")}
                </button>
                {for SKILL_FILTERS.iter().map(|(filter, key)| html! {
                    <button class="filter-pill" type="button" data-filter={*filter}>
                        {locale.t(key)}
                    </button>
                })}
            </div>
            <div class="skills-list" data-animate-bars="">
                {for SKILL_BARS.iter().map(|(key, category, percent)| html! {
                    <div class="skills-category" data-category={*category}>
                        <div class="skill-header">
                            <span>{locale.t(key)}</span>
                            <span>{format!("{percent}%")}</span>
                        </div>
                        <div class="skill-bar">
                            <div class="skill-fill" data-percent={percent.to_string()}></div>
                        </div>
                    </div>
                })}
            </div>
            <h3 data-reveal="fade">{locale.t("spokenLanguages")}</h3>
            <div class="languages-list" data-animate-languages="">
                {for LANGUAGE_BARS.iter().map(|(key, percent)| {
                    let level = if *percent == 100 {
                        locale.t("native")
                    } else {
                        format!("{percent}%")
                    };
                    html! {
                        <div class="language-item">
                            <div class="skill-header">
                                <span>{locale.t(key)}</span>
                                <span>{level}</span>
                            </div>
                            <div class="language-bar">
                                <div class="language-fill" data-percent={percent.to_string()}></div>
                            </div>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}

fn about(locale: &Locale) -> Html {
    html! {
        <section id="about" class="section">
            <h2 class="section-title" data-reveal="section">{locale.t("about")}</h2>
            <div class="about-grid">
                <p class="about-bio" data-reveal="fade">{locale.t("aboutBio")}</p>
                <ul class="about-facts" data-reveal="stagger">
                    <li data-reveal-item="" data-tooltip={locale.t("willingToTravel")}>
                        {locale.t("locationMadrid")}
                    </li>
                    <li data-reveal-item="">{locale.t("willingToTravel")}</li>
                    <li data-reveal-item="">{locale.t("drivingLicense")}</li>
                </ul>
            </div>
            <div class="stats" data-animate-counters="">
                {for COUNTERS.iter().map(|(target, initial, label)| html! {
                    <div class="stat">
                        <span class="stat-number" data-count={*target}>{*initial}</span>
                        <span class="stat-label">{locale.t(label)}</span>
                    </div>
                })}
            </div>
            {skills(locale)}
        </section>
    }
}

fn experience(locale: &Locale) -> Html {
    html! {
        <section id="experience" class="section">
            <h2 class="section-title" data-reveal="section">{locale.t("experience")}</h2>
            <div class="timeline" data-reveal="timeline">
                <div class="timeline-line"><div class="timeline-progress"></div></div>
                {for JOBS.iter().map(|(title, description)| html! {
                    <article class="timeline-item" data-reveal-item="">
                        <h3>{locale.t(title)}</h3>
                        <p>{locale.t(description)}</p>
                    </article>
                })}
            </div>
            <h3 data-reveal="fade">{locale.t("education")}</h3>
            <ul class="education-list" data-reveal="stagger">
                {for EDUCATION.iter().map(|key| html! {
                    <li data-reveal-item="">{locale.t(key)}</li>
                })}
            </ul>
            <h3 data-reveal="fade">{locale.t("certifications")}</h3>
            <ul class="certification-list" data-reveal="stagger">
                {for CERTIFICATIONS.iter().map(|(key, status)| html! {
                    <li data-reveal-item="">
                        <span>{locale.t(key)}</span>
                        <span class={classes!("badge", *status)}>{locale.t(status)}</span>
                    </li>
                })}
            </ul>
        </section>
    }
}

fn projects(locale: &Locale) -> Html {
    html! {
        <section id="projects" class="section">
            <h2 class="section-title" data-reveal="section">{locale.t("projects")}</h2>
            <div class="projects-grid" data-reveal="stagger">
                {for PROJECTS.iter().map(|project| html! {
                    <article class="project-card tilt-card" data-reveal-item="">
                        <h3>{project.title}</h3>
                        <p class="project-role">{locale.t(project.role)}</p>
                        <p>{locale.t(project.description)}</p>
                        <ul class="project-tags">
                            {for project.tags.iter().map(|tag| html! { <li>{locale.t(tag)}</li> })}
                        </ul>
                        <dl class="project-metrics">
                            {for project.metrics.iter().map(|(value, label)| html! {
                                <div class="metric">
                                    <dt>{*value}</dt>
                                    <dd>{locale.t(label)}</dd>
                                </div>
                            })}
                        </dl>
                    </article>
                })}
            </div>
        </section>
    }
}

fn contact(locale: &Locale) -> Html {
    html! {
        <section id="contact" class="section">
            <h2 class="section-title" data-reveal="section">{locale.t("getInTouch")}</h2>
            <p class="contact-description" data-reveal="fade">{locale.t("contactDescription")}</p>
            <ContactFormView locale={locale.clone()} />
        </section>
    }
}

fn footer(locale: &Locale) -> Html {
    let year = js_sys::Date::new_0().get_full_year();
    html! {
        <footer class="footer">
            <p>{format!("© {year} {OWNER}. ")}{locale.t("allRightsReserved")}</p>
            <p class="muted">{locale.t("builtWith")}</p>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub context: AppContext,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let context = props.context.clone();
    let preferences = use_state(|| Preferences::load(&LocalStore));
    let locale = Locale {
        context: context.clone(),
        language: preferences.language,
    };

    {
        let theme = preferences.theme;
        use_effect_with((), move |_| {
            apply_theme(theme);
            || ()
        });
    }

    {
        let context = context.clone();
        use_effect_with(preferences.language, move |language| {
            let language = *language;
            let translations = context.translations();
            apply_language(language, translations.document_title(language));

            let typing = Rc::clone(&context.engines().typing);
            if let Some(target) = window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("typed-text"))
            {
                typing.start(&target, &translations.typed_phrases(language));
            }
            context
                .logger()
                .info("language_applied", json!({ "lang": language.as_str() }));
            move || typing.stop()
        });
    }

    {
        let context = context.clone();
        use_effect_with((), move |_| {
            let behaviors = Behaviors::install(&context);
            move || drop(behaviors)
        });
    }

    let on_theme = {
        let preferences = preferences.clone();
        let reduced_motion = context.reduced_motion();
        Callback::from(move |_: MouseEvent| {
            let mut next = *preferences;
            let theme = next.toggle_theme(&LocalStore);
            apply_theme_with_transition(theme, reduced_motion);
            preferences.set(next);
        })
    };

    let on_language = {
        let preferences = preferences.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *preferences;
            next.toggle_language(&LocalStore);
            preferences.set(next);
        })
    };

    html! {
        <>
            {site_header(&locale, &preferences, on_theme, on_language)}
            <main id="content">
                {hero(&locale)}
                {about(&locale)}
                {experience(&locale)}
                {projects(&locale)}
                {contact(&locale)}
            </main>
            {footer(&locale)}
            <CommandPalette locale={locale.clone()} />
            <div id="tooltip" class="tooltip" role="tooltip">
                <div class="tooltip-content"></div>
            </div>
        </>
    }
}

fn mount_point() -> Element {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .expect("missing #app mount point")
}

pub fn run() {
    let config = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|root| SiteConfig::from_attributes(|name| root.get_attribute(name)))
        .unwrap_or_default();
    let logger = Logger::new(config.log_level);

    spawn_local(async move {
        let translations = load_translations(
            |language| fetch_dictionary(config.translation_url(language.as_str())),
            &logger,
        )
        .await;
        let context = AppContext::new(config, logger, translations);
        yew::Renderer::<App>::with_root_and_props(mount_point(), AppProps { context }).render();
    });
}
