//! Main application component.

use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::KeyboardEvent;
use yew::prelude::*;

use playground_rs::{BuildTicket, Session, StyleAugmentation, assemble, codec, encode};

use crate::collab::{Formatter, ScriptCompiler};
use crate::components::{EditorOption, EditorPanel, PreviewPanel};
use crate::scheduler::PreviewScheduler;

/// Read the share token from the current URL, if any.
fn token_from_location() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let token = search.strip_prefix('?').unwrap_or(&search);
    (!token.is_empty()).then(|| token.to_string())
}

/// Session seeded from the share link, or defaults.
///
/// A corrupted link is not fatal: it logs and falls back.
fn initial_session() -> Session {
    let Some(token) = token_from_location() else {
        return Session::default();
    };
    match codec::decode(&token) {
        Ok(session) => session,
        Err(err) => {
            console::warn!(format!("{err}; starting from defaults"));
            Session::default()
        }
    }
}

/// Replace the page URL with the share token (no new history entry) and
/// copy the full link to the clipboard. Both are best-effort.
fn publish_share_url(token: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Ok(history) = window.history() {
        let query = format!("?{token}");
        if let Err(err) = history.replace_state_with_url(&JsValue::NULL, "", Some(&query)) {
            console::warn!("could not update share url", err);
        }
    }
    if let Ok(href) = window.location().href() {
        let clipboard = window.navigator().clipboard();
        spawn_local(async move {
            if JsFuture::from(clipboard.write_text(&href)).await.is_err() {
                console::warn!("could not copy share link to clipboard");
            }
        });
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let session = use_state(initial_session);
    let compiler_ready = use_state(|| false);
    let preview_doc = use_state(String::new);

    let scheduler = use_memo((), |_| PreviewScheduler::new());
    let compiler = use_memo((), |_| ScriptCompiler::new());
    let formatter = use_memo((), |_| Formatter::new());

    // Mirror of the current session for the window-level key handler,
    // which is installed once and would otherwise see the mount-time
    // state forever.
    let latest_session = use_mut_ref(|| (*session).clone());
    *latest_session.borrow_mut() = (*session).clone();

    // One rebuild cycle: resolve the executable script, assemble, and
    // publish — unless a newer rebuild started while this one was in
    // flight, in which case the result is dropped.
    let run_build: Rc<dyn Fn(Session, BuildTicket)> = {
        let preview_doc = preview_doc.clone();
        let scheduler = (*scheduler).clone();
        let compiler = *compiler;
        Rc::new(move |session: Session, ticket: BuildTicket| {
            let preview_doc = preview_doc.clone();
            let scheduler = scheduler.clone();
            spawn_local(async move {
                match compiler.to_executable(&session).await {
                    Ok(script) => {
                        if scheduler.is_current(ticket) {
                            preview_doc.set(assemble(&session, &script));
                        }
                    }
                    Err(err) => {
                        // Previous preview stays up; this cycle runs no script.
                        console::error!("script compile failed", err);
                    }
                }
            });
        })
    };

    // Ctrl+S: format every pane, commit atomically, rebuild now, then
    // refresh and copy the share link.
    let on_format: Rc<dyn Fn()> = {
        let session = session.clone();
        let latest_session = latest_session.clone();
        let scheduler = (*scheduler).clone();
        let formatter = *formatter;
        let run_build = run_build.clone();
        Rc::new(move || {
            let session = session.clone();
            let current = latest_session.borrow().clone();
            let scheduler = scheduler.clone();
            let run_build = run_build.clone();
            spawn_local(async move {
                // All-or-nothing: one rejected pane aborts the whole
                // commit — no field update, no URL, no clipboard.
                let formatted = match formatter.format_session(&current).await {
                    Ok(formatted) => formatted,
                    Err(err) => {
                        console::error!("format failed; session left untouched", err);
                        return;
                    }
                };
                session.set(formatted.clone());
                let job_session = formatted.clone();
                scheduler.force(&formatted, move |ticket| (*run_build)(job_session, ticket));
                publish_share_url(&encode(&formatted));
            });
        })
    };

    // Reactive fan-out: any session field or the readiness flip lands
    // here and schedules a debounced rebuild. The scheduler drops the
    // request while a typed-script session is gated; the readiness
    // transition re-runs this effect, so the blocked preview fires
    // exactly once without further edits.
    {
        let scheduler = (*scheduler).clone();
        let run_build = run_build.clone();
        use_effect_with(
            ((*session).clone(), *compiler_ready),
            move |(session, _ready)| {
                let job_session = session.clone();
                let run_build = run_build.clone();
                scheduler.schedule(session, move |ticket| (*run_build)(job_session, ticket));
                || ()
            },
        );
    }

    // Startup: kick off compiler initialization and install the global
    // key listener.
    {
        let scheduler = (*scheduler).clone();
        let compiler = *compiler;
        let compiler_ready = compiler_ready.clone();
        let on_format = on_format.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match compiler.initialize().await {
                    Ok(()) => {
                        scheduler.mark_ready();
                        compiler_ready.set(true);
                    }
                    Err(err) => console::error!("compiler failed to initialize", err),
                }
            });

            let window = web_sys::window().unwrap();
            let options = EventListenerOptions::enable_prevent_default();
            let listener =
                EventListener::new_with_options(&window, "keydown", options, move |event| {
                    let event: &KeyboardEvent = event.unchecked_ref();
                    if event.ctrl_key() && event.key() == "s" {
                        event.prevent_default();
                        event.stop_propagation();
                        (*on_format)();
                    }
                });
            move || drop(listener)
        });
    }

    let on_markup_change = {
        let session = session.clone();
        Callback::from(move |text: String| {
            let mut new_session = (*session).clone();
            new_session.markup = text;
            session.set(new_session);
        })
    };

    let on_style_change = {
        let session = session.clone();
        Callback::from(move |text: String| {
            let mut new_session = (*session).clone();
            new_session.style = text;
            session.set(new_session);
        })
    };

    let on_script_change = {
        let session = session.clone();
        Callback::from(move |text: String| {
            let mut new_session = (*session).clone();
            new_session.script = text;
            session.set(new_session);
        })
    };

    let on_augmentation_change = {
        let session = session.clone();
        Callback::from(move |value: String| {
            if let Some(mode) = StyleAugmentation::from_name(&value) {
                let mut new_session = (*session).clone();
                new_session.style_augmentation = mode;
                session.set(new_session);
            }
        })
    };

    let on_script_mode_change = {
        let session = session.clone();
        Callback::from(move |value: String| {
            let mut new_session = (*session).clone();
            new_session.script_is_typed = value == "ts";
            session.set(new_session);
        })
    };

    let markup_options = vec![EditorOption {
        name: "HTML",
        value: "html",
    }];
    let style_options = vec![
        EditorOption {
            name: "CSS",
            value: "none",
        },
        EditorOption {
            name: "CSS + modern-normalize",
            value: "normalize",
        },
        EditorOption {
            name: "CSS + Tailwind",
            value: "tailwind",
        },
    ];
    let script_options = vec![
        EditorOption {
            name: "TypeScript",
            value: "ts",
        },
        EditorOption {
            name: "JavaScript",
            value: "js",
        },
    ];

    html! {
        <div class="app">
            <header class="header">
                <div class="header-left">
                    <h1>{ "playground-rs" }</h1>
                    <p class="subtitle">{ "Live HTML / CSS / TypeScript Playground" }</p>
                </div>
                <div class="header-right">
                    <span class="hint">{ "Ctrl+S formats all panes and copies a share link" }</span>
                </div>
            </header>

            <main class="main">
                <div class="panels">
                    <EditorPanel
                        title="HTML"
                        value={session.markup.clone()}
                        on_change={on_markup_change}
                        options={markup_options}
                    />

                    <EditorPanel
                        title="CSS"
                        value={session.style.clone()}
                        on_change={on_style_change}
                        options={style_options}
                        selected={Some(session.style_augmentation.name())}
                        on_select_change={on_augmentation_change}
                    />

                    <EditorPanel
                        title="Script"
                        value={session.script.clone()}
                        on_change={on_script_change}
                        options={script_options}
                        selected={Some(if session.script_is_typed { "ts" } else { "js" })}
                        on_select_change={on_script_mode_change}
                    />

                    <PreviewPanel document={(*preview_doc).clone()} />
                </div>
            </main>

            <footer class="footer">
                <div class="footer-row">
                    <span>{ "Sandboxed preview (allow-scripts) | session state lives in the URL" }</span>
                </div>
                <div class="footer-row">
                    <span class="footer-left">{ "MIT License" }</span>
                    <span class="footer-build">
                        { format!("Build: {} {}", env!("BUILD_COMMIT"), env!("BUILD_TIMESTAMP")) }
                    </span>
                </div>
            </footer>
        </div>
    }
}
