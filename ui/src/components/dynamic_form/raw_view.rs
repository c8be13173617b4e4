use leptos::prelude::*;

use studio_forms::domain::ContentKind;

/// Read-only viewer for markdown, JSON and YAML payloads
#[component]
pub fn RawView(kind: ContentKind, text: String) -> impl IntoView {
    let (label, class) = match kind {
        ContentKind::Markdown => ("Markdown", "whitespace-pre-wrap text-sm text-gray-800"),
        ContentKind::Json => ("JSON", "font-mono text-xs text-gray-800"),
        ContentKind::Yaml => ("YAML", "font-mono text-xs text-gray-800"),
        ContentKind::Object => ("Data", "font-mono text-xs text-gray-800"),
    };

    view! {
        <div class="border border-gray-200 rounded-lg bg-white">
            <div class="px-3 py-1 text-xs font-medium text-gray-500 border-b border-gray-200">
                {label}
            </div>
            <pre class=format!("p-3 overflow-x-auto {}", class)>{text}</pre>
        </div>
    }
}
