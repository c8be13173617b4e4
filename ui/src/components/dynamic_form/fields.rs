//! Leaf Field Renderers
//!
//! One component per widget kind, chosen by an exhaustive match.

use leptos::prelude::*;
use leptos::web_sys;
use serde_json::{json, Value};
use wasm_bindgen::JsCast;

use studio_forms::domain::{EnumOption, FieldPath, SchemaType};
use studio_forms::form::{LeafControl, WidgetKind};

use super::FormState;

const INPUT_CLASS: &str =
    "w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500 disabled:bg-gray-100";

// ============================================================================
// Leaf Field
// ============================================================================

/// Label, widget and error list for one leaf
#[component]
pub fn LeafField(leaf: LeafControl, state: FormState) -> impl IntoView {
    let path = leaf.store_path();
    let path_for_errors = path.clone();
    let errors = move || state.errors(&path_for_errors);

    view! {
        <div class="space-y-1">
            <label class="flex items-center gap-1 text-sm font-medium text-gray-700">
                {leaf.title.clone()}
                {leaf.required.then(|| view! {
                    <span class="text-xs text-red-500">"*"</span>
                })}
            </label>
            {leaf.description.clone().map(|desc| view! {
                <p class="text-xs text-gray-500">{desc}</p>
            })}
            {widget(leaf, path, state)}
            <ul class="text-xs text-red-600">
                {move || errors().into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
            </ul>
        </div>
    }
}

fn widget(leaf: LeafControl, path: FieldPath, state: FormState) -> AnyView {
    let editable = leaf.editable();
    // Same fallback the composer applies to an empty store slot
    let fallback = leaf.schema.default.clone();
    match leaf.widget {
        WidgetKind::Checkbox => view! {
            <CheckboxInput path=path fallback=fallback state=state editable=editable />
        }.into_any(),
        WidgetKind::Switch => view! {
            <SwitchInput path=path fallback=fallback state=state editable=editable />
        }.into_any(),
        WidgetKind::Radio => view! {
            <RadioGroup path=path fallback=fallback options=leaf.options state=state editable=editable />
        }.into_any(),
        WidgetKind::Select => view! {
            <SelectInput path=path fallback=fallback options=leaf.options state=state editable=editable />
        }.into_any(),
        WidgetKind::Slider => view! {
            <SliderInput
                path=path
                fallback=fallback
                minimum=leaf.schema.minimum.unwrap_or(0.0)
                maximum=leaf.schema.maximum.unwrap_or(100.0)
                step=leaf.schema.multiple_of
                state=state
                editable=editable
            />
        }.into_any(),
        WidgetKind::CodeView => view! {
            <CodeViewer path=path fallback=fallback state=state />
        }.into_any(),
        WidgetKind::Text => {
            let kind = leaf.schema.schema_type();
            if leaf.multiline {
                view! { <TextArea path=path fallback=fallback state=state editable=editable /> }.into_any()
            } else if matches!(kind, Some(SchemaType::Integer) | Some(SchemaType::Number)) {
                let is_integer = kind == Some(SchemaType::Integer);
                view! { <NumberInput path=path fallback=fallback is_integer=is_integer state=state editable=editable /> }.into_any()
            } else {
                let input_type = match leaf.schema.format.as_deref() {
                    Some("email") => "email",
                    Some("uri") | Some("url") => "url",
                    Some("date") => "date",
                    Some("date-time") => "datetime-local",
                    _ => "text",
                };
                view! {
                    <StringInput path=path fallback=fallback input_type=input_type state=state editable=editable />
                }.into_any()
            }
        }
    }
}

fn input_value(ev: &web_sys::Event) -> Option<String> {
    let target = ev.target()?;
    if let Ok(input) = target.clone().dyn_into::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Ok(select) = target.clone().dyn_into::<web_sys::HtmlSelectElement>() {
        return Some(select.value());
    }
    target
        .dyn_into::<web_sys::HtmlTextAreaElement>()
        .ok()
        .map(|area| area.value())
}

fn input_checked(ev: &web_sys::Event) -> Option<bool> {
    ev.target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()
        .map(|input| input.checked())
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ============================================================================
// Boolean Widgets
// ============================================================================

#[component]
fn CheckboxInput(path: FieldPath, fallback: Option<Value>, state: FormState, editable: bool) -> impl IntoView {
    let path_for_change = path.clone();
    view! {
        <input
            type="checkbox"
            class="rounded border-gray-300 text-blue-600 focus:ring-blue-500"
            disabled=!editable
            prop:checked=move || state.resolved(&path, fallback.as_ref()).as_bool().unwrap_or(false)
            on:change=move |ev| {
                if let Some(checked) = input_checked(&ev) {
                    state.set_value(&path_for_change, Value::Bool(checked));
                }
            }
        />
    }
}

#[component]
fn SwitchInput(path: FieldPath, fallback: Option<Value>, state: FormState, editable: bool) -> impl IntoView {
    let path_for_click = path.clone();
    let on = Memo::new(move |_| state.resolved(&path, fallback.as_ref()).as_bool().unwrap_or(false));
    view! {
        <button
            type="button"
            role="switch"
            disabled=!editable
            aria-checked=move || on.get().to_string()
            class=move || format!(
                "relative inline-flex h-6 w-11 items-center rounded-full transition-colors {}",
                if on.get() { "bg-blue-600" } else { "bg-gray-300" }
            )
            on:click=move |_| {
                state.set_value(&path_for_click, Value::Bool(!on.get_untracked()));
            }
        >
            <span class=move || format!(
                "inline-block h-4 w-4 transform rounded-full bg-white transition {}",
                if on.get() { "translate-x-6" } else { "translate-x-1" }
            ) />
        </button>
    }
}

// ============================================================================
// Choice Widgets
// ============================================================================

#[component]
fn RadioGroup(
    path: FieldPath,
    fallback: Option<Value>,
    options: Vec<EnumOption>,
    state: FormState,
    editable: bool,
) -> impl IntoView {
    let group = path.to_store_key();
    view! {
        <div class="flex flex-wrap gap-3">
            {options.into_iter().map(|option| {
                let label = option.display_label();
                let value_for_check = option.value.clone();
                let path_for_check = path.clone();
                let fallback_for_check = fallback.clone();
                let path_for_change = path.clone();
                let value = option.value;
                view! {
                    <label class="inline-flex items-center gap-1 text-sm">
                        <input
                            type="radio"
                            name=group.clone()
                            disabled=!editable
                            prop:checked=move || state.resolved(&path_for_check, fallback_for_check.as_ref()) == value_for_check
                            on:change=move |_| state.set_value(&path_for_change, value.clone())
                        />
                        {label}
                    </label>
                }
            }).collect_view()}
        </div>
    }
}

#[component]
fn SelectInput(
    path: FieldPath,
    fallback: Option<Value>,
    options: Vec<EnumOption>,
    state: FormState,
    editable: bool,
) -> impl IntoView {
    let path_for_value = path.clone();
    let options_for_change = options.clone();
    // Options are addressed by position so non-string values survive the DOM
    let selected_index = move || {
        let current = state.resolved(&path_for_value, fallback.as_ref());
        options
            .iter()
            .position(|o| o.value == current)
            .map(|i| i.to_string())
            .unwrap_or_default()
    };
    let labels: Vec<String> = options_for_change.iter().map(EnumOption::display_label).collect();

    view! {
        <select
            class=INPUT_CLASS
            disabled=!editable
            prop:value=selected_index
            on:change=move |ev| {
                let picked = input_value(&ev)
                    .and_then(|v| v.parse::<usize>().ok())
                    .and_then(|i| options_for_change.get(i))
                    .map(|o| o.value.clone())
                    .unwrap_or(Value::Null);
                state.set_value(&path, picked);
            }
        >
            <option value="">"-- Select --"</option>
            {labels.into_iter().enumerate().map(|(idx, label)| view! {
                <option value=idx.to_string()>{label}</option>
            }).collect_view()}
        </select>
    }
}

#[component]
fn SliderInput(
    path: FieldPath,
    fallback: Option<Value>,
    minimum: f64,
    maximum: f64,
    step: Option<f64>,
    state: FormState,
    editable: bool,
) -> impl IntoView {
    let path_for_value = path.clone();
    let path_for_label = path.clone();
    let fallback_for_label = fallback.clone();
    let step_attr = step.map(|s| s.to_string()).unwrap_or_else(|| "any".to_string());

    view! {
        <div class="flex items-center gap-3">
            <span class="text-xs text-gray-500">{minimum.to_string()}</span>
            <input
                type="range"
                class="flex-1"
                min=minimum.to_string()
                max=maximum.to_string()
                step=step_attr
                disabled=!editable
                prop:value=move || state.resolved(&path_for_value, fallback.as_ref()).as_f64().unwrap_or(minimum).to_string()
                on:input=move |ev| {
                    if let Some(n) = input_value(&ev).and_then(|v| v.parse::<f64>().ok()) {
                        state.set_value(&path, json!(n));
                    }
                }
            />
            <span class="text-xs text-gray-500">{maximum.to_string()}</span>
            <span class="w-12 text-sm text-right font-mono">
                {move || display_text(&state.resolved(&path_for_label, fallback_for_label.as_ref()))}
            </span>
        </div>
    }
}

// ============================================================================
// Text Widgets
// ============================================================================

#[component]
fn StringInput(
    path: FieldPath,
    fallback: Option<Value>,
    input_type: &'static str,
    state: FormState,
    editable: bool,
) -> impl IntoView {
    let path_for_value = path.clone();
    view! {
        <input
            type=input_type
            class=INPUT_CLASS
            disabled=!editable
            prop:value=move || display_text(&state.resolved(&path_for_value, fallback.as_ref()))
            on:input=move |ev| {
                if let Some(text) = input_value(&ev) {
                    state.set_value(&path, Value::String(text));
                }
            }
        />
    }
}

#[component]
fn NumberInput(path: FieldPath, fallback: Option<Value>, is_integer: bool, state: FormState, editable: bool) -> impl IntoView {
    let path_for_value = path.clone();
    let step = if is_integer { "1" } else { "any" };
    view! {
        <input
            type="number"
            step=step
            class=INPUT_CLASS
            disabled=!editable
            prop:value=move || display_text(&state.resolved(&path_for_value, fallback.as_ref()))
            on:input=move |ev| {
                let Some(text) = input_value(&ev) else { return };
                let parsed = if text.is_empty() {
                    Some(Value::Null)
                } else if is_integer {
                    text.parse::<i64>().ok().map(|n| json!(n))
                } else {
                    text.parse::<f64>().ok().map(|n| json!(n))
                };
                if let Some(value) = parsed {
                    state.set_value(&path, value);
                }
            }
        />
    }
}

#[component]
fn TextArea(path: FieldPath, fallback: Option<Value>, state: FormState, editable: bool) -> impl IntoView {
    let path_for_value = path.clone();
    view! {
        <textarea
            rows=5
            class=INPUT_CLASS
            disabled=!editable
            prop:value=move || display_text(&state.resolved(&path_for_value, fallback.as_ref()))
            on:input=move |ev| {
                if let Some(text) = input_value(&ev) {
                    state.set_value(&path, Value::String(text));
                }
            }
        />
    }
}

#[component]
fn CodeViewer(path: FieldPath, fallback: Option<Value>, state: FormState) -> impl IntoView {
    let code = move || match state.resolved(&path, fallback.as_ref()) {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => serde_json::to_string_pretty(&other).unwrap_or_else(|_| other.to_string()),
    };
    view! {
        <pre class="px-3 py-2 text-xs font-mono bg-gray-900 text-gray-100 rounded-md overflow-x-auto">
            {code}
        </pre>
    }
}
