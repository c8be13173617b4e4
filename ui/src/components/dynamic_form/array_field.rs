//! Array Field Component
//!
//! Lists array elements with add/remove and a collapse toggle.

use leptos::prelude::*;

use studio_forms::form::ArrayControl;

use super::control::Control;
use super::FormState;

/// Editor for array fields with dynamic add/remove
#[component]
pub fn ArrayField(array: ArrayControl, state: FormState) -> impl IntoView {
    let key = array.path.as_ref().map(|p| p.to_store_key()).unwrap_or_default();
    let initially_collapsed = array.collapsed;
    let key_for_check = key.clone();
    let collapsed = Memo::new(move |_| state.is_collapsed(&key_for_check, initially_collapsed));

    let mutable = array.mutable;
    let count = array.len();
    let array_for_add = array.clone();
    let items = array.items.clone();

    view! {
        <div class="border border-gray-200 rounded-lg p-3 bg-gray-50">
            <div class="flex items-center justify-between mb-2">
                <button
                    type="button"
                    class="flex items-center gap-2 text-sm font-medium text-gray-700"
                    on:click=move |_| state.toggle_collapsed(key.clone(), initially_collapsed)
                >
                    <span class="text-xs text-gray-400">
                        {move || if collapsed.get() { "▸" } else { "▾" }}
                    </span>
                    {array.title.clone()}
                    <span class="text-xs text-gray-500">{format!("({} items)", count)}</span>
                </button>
                {mutable.then(|| view! {
                    <button
                        type="button"
                        class="px-2 py-1 text-xs rounded text-blue-600 hover:bg-blue-50"
                        on:click=move |_| state.append(&array_for_add)
                    >
                        "Add Item"
                    </button>
                })}
            </div>
            {array.description.clone().map(|desc| view! {
                <p class="mb-2 text-xs text-gray-500">{desc}</p>
            })}

            <div style=move || if collapsed.get() { "display: none" } else { "display: block" }>
                {if items.is_empty() {
                    view! {
                        <div class="text-sm text-gray-400 italic p-3 text-center">"No items."</div>
                    }.into_any()
                } else {
                    view! {
                        <div class="space-y-2">
                            {items.into_iter().enumerate().map(|(idx, item)| {
                                let array_for_remove = array.clone();
                                view! {
                                    <div class="border border-gray-200 rounded-lg p-2 bg-white">
                                        <div class="flex items-center justify-between mb-2">
                                            <span class="text-xs font-medium text-gray-600">
                                                {format!("#{}", idx + 1)}
                                            </span>
                                            {mutable.then(|| view! {
                                                <button
                                                    type="button"
                                                    class="text-xs text-red-500 hover:bg-red-50 px-2 py-1 rounded"
                                                    on:click=move |_| state.remove(&array_for_remove, idx)
                                                >
                                                    "Remove"
                                                </button>
                                            })}
                                        </div>
                                        <Control node=item state=state />
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    }.into_any()
                }}
            </div>
        </div>
    }
}
