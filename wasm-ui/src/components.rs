//! UI components for the playground panels.

use yew::prelude::*;

/// One entry in a panel's language/mode selector.
#[derive(Clone, PartialEq)]
pub struct EditorOption {
    pub name: &'static str,
    pub value: &'static str,
}

/// Editor panel: a titled editing surface plus a mode selector when the
/// panel has more than one option.
#[derive(Properties, PartialEq)]
pub struct EditorPanelProps {
    pub title: &'static str,
    pub value: String,
    pub on_change: Callback<String>,
    pub options: Vec<EditorOption>,
    /// Value of the currently selected option; required when `options`
    /// has more than one entry.
    #[prop_or_default]
    pub selected: Option<&'static str>,
    #[prop_or_default]
    pub on_select_change: Option<Callback<String>>,
}

#[function_component(EditorPanel)]
pub fn editor_panel(props: &EditorPanelProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(target.value());
        })
    };

    let on_select = {
        let on_select_change = props.on_select_change.clone();
        Callback::from(move |e: Event| {
            let target: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Some(on_select_change) = &on_select_change {
                on_select_change.emit(target.value());
            }
        })
    };

    html! {
        <div class="panel editor-panel">
            <div class="panel-header">
                <h2>{ props.title }</h2>
                if props.options.len() > 1 {
                    <select class="mode-select" onchange={on_select}>
                        { for props.options.iter().map(|option| {
                            html! {
                                <option
                                    value={option.value}
                                    selected={props.selected == Some(option.value)}
                                >
                                    { option.name }
                                </option>
                            }
                        })}
                    </select>
                }
            </div>
            <div class="panel-content">
                // Controlled value: externally-pushed updates (e.g. the
                // format trigger) re-sync the surface without firing
                // `oninput`, so no change loop.
                <textarea
                    class="editor-input"
                    value={props.value.clone()}
                    oninput={on_input}
                    spellcheck="false"
                />
            </div>
        </div>
    }
}

/// Preview panel: the sandboxed rendering surface.
#[derive(Properties, PartialEq)]
pub struct PreviewPanelProps {
    /// The complete preview document, replaced wholesale on every
    /// publication.
    pub document: String,
}

#[function_component(PreviewPanel)]
pub fn preview_panel(props: &PreviewPanelProps) -> Html {
    html! {
        <div class="panel preview-panel">
            <div class="panel-header">
                <h2>{ "Preview" }</h2>
            </div>
            <div class="panel-content">
                // allow-scripts only: the document may run its script
                // but never gains same-origin privileges against the
                // host page. This is the sole security boundary.
                <iframe
                    aria-label="Preview"
                    class="preview-frame"
                    sandbox="allow-scripts"
                    srcdoc={props.document.clone()}
                ></iframe>
            </div>
        </div>
    }
}
