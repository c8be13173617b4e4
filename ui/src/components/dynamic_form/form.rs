//! Top-level form component
//!
//! Picks the form or raw view for a document and renders one submit button
//! per transition.

use leptos::prelude::*;

use studio_forms::config::FormSettings;
use studio_forms::domain::Document;
use studio_forms::form::{build_submission, dispatch, validate_tree, DocumentView, Submission};

use super::control::Control;
use super::raw_view::RawView;
use super::FormState;

#[component]
pub fn DynamicForm(
    /// Document to render, with its initial values
    document: Document,
    /// Receives the payload when a transition validates
    on_submit: Callback<Submission>,
    #[prop(optional)] settings: Option<FormSettings>,
) -> impl IntoView {
    let settings = settings.unwrap_or_default();
    let state = FormState::new(document.values.clone());
    let (submit_error, set_submit_error) = signal(Option::<String>::None);

    let doc_for_view = document.clone();
    let settings_for_view = settings.clone();
    let view_model = Memo::new(move |_| {
        state.structure.track();
        state
            .store
            .with_untracked(|s| dispatch(&doc_for_view, s, &settings_for_view))
    });

    let transitions = if document.transitions.is_empty() {
        vec!["submit".to_string()]
    } else {
        document.transitions.clone()
    };
    let view_only = document.view_only;

    let submit = move |transition: String| {
        let current = state.store.get_untracked();
        if let DocumentView::Form { tree } = dispatch(&document, &current, &settings) {
            let mut report = None;
            state.store.update(|s| report = Some(validate_tree(&tree, s)));
            if let Some(report) = report.filter(|r| !r.is_valid()) {
                log::warn!("Submission blocked: {} invalid fields", report.errors.len());
                set_submit_error.set(Some(format!(
                    "Fix {} field(s) before submitting",
                    report.errors.len()
                )));
                return;
            }
        }

        let result = state
            .store
            .with_untracked(|s| build_submission(&document, s, &transition, &settings));
        match result {
            Ok(submission) => {
                set_submit_error.set(None);
                log::info!("Submitting transition '{}'", submission.transition);
                on_submit.run(submission);
            }
            Err(e) => set_submit_error.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="dynamic-form space-y-4">
            {move || match view_model.get() {
                DocumentView::Form { tree } => view! {
                    <Control node=tree state=state />
                }.into_any(),
                DocumentView::Raw { kind, text } => view! {
                    <RawView kind=kind text=text />
                }.into_any(),
            }}

            {move || submit_error.get().map(|err| view! {
                <p class="text-sm text-red-600">{err}</p>
            })}

            {(!view_only).then(|| view! {
                <div class="flex gap-2 pt-2 border-t border-gray-200">
                    {transitions.into_iter().map(|transition| {
                        let label = transition.clone();
                        let submit = submit.clone();
                        view! {
                            <button
                                type="button"
                                class="px-4 py-2 text-sm font-medium rounded-md bg-blue-600 text-white hover:bg-blue-700"
                                on:click=move |_| submit(transition.clone())
                            >
                                {label}
                            </button>
                        }
                    }).collect_view()}
                </div>
            })}
        </div>
    }
}
