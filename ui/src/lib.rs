use leptos::prelude::*;

mod components;

use components::dynamic_form::DynamicForm;
use studio_forms::domain::Document;
use studio_forms::form::Submission;

const SAMPLE_DOCUMENT: &str = include_str!("../sample/order.json");

#[component]
pub fn App() -> impl IntoView {
    let (last_submission, set_last_submission) = signal(Option::<Submission>::None);

    let document = match Document::parse(SAMPLE_DOCUMENT, "json") {
        Ok(doc) => doc,
        Err(e) => {
            log::error!("Failed to parse sample document: {}", e);
            return view! {
                <p class="p-6 text-red-600">{format!("Invalid sample document: {}", e)}</p>
            }.into_any();
        }
    };

    let on_submit = Callback::new(move |submission: Submission| {
        set_last_submission.set(Some(submission));
    });

    view! {
        <div class="min-h-screen bg-gray-100 p-8">
            <div class="max-w-2xl mx-auto bg-white rounded-lg shadow p-6 space-y-6">
                <h1 class="text-2xl font-bold">"Studio Forms"</h1>
                <DynamicForm document=document on_submit=on_submit />
                {move || last_submission.get().map(|submission| view! {
                    <div>
                        <h2 class="text-sm font-semibold text-gray-700 mb-1">
                            {format!("Submitted with '{}'", submission.transition)}
                        </h2>
                        <pre class="p-3 text-xs font-mono bg-gray-50 rounded">
                            {serde_json::to_string_pretty(&submission.payload).unwrap_or_default()}
                        </pre>
                    </div>
                })}
            </div>
        </div>
    }.into_any()
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
