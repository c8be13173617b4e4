//! Recursive control renderer

use leptos::prelude::*;

use studio_forms::form::{ControlNode, ObjectControl};

use super::array_field::ArrayField;
use super::fields::LeafField;
use super::FormState;

/// Renders one node of the control tree (recursive for objects/arrays)
#[component]
pub fn Control(node: ControlNode, state: FormState) -> impl IntoView {
    match node {
        ControlNode::Object(object) => view! {
            <ObjectGroup object=object state=state />
        }.into_any(),
        ControlNode::Array(array) => view! {
            <ArrayField array=array state=state />
        }.into_any(),
        ControlNode::Leaf(leaf) => view! {
            <LeafField leaf=leaf state=state />
        }.into_any(),
    }
}

#[component]
fn ObjectGroup(object: ObjectControl, state: FormState) -> impl IntoView {
    let nested = object.path.is_some();
    let class = if nested {
        "ml-4 border-l-2 border-gray-200 pl-3 space-y-3"
    } else {
        "space-y-3"
    };

    view! {
        <fieldset class=class>
            {(!object.title.is_empty()).then(|| view! {
                <legend class="text-sm font-semibold text-gray-800">
                    {object.title.clone()}
                    {object.required.then(|| view! {
                        <span class="ml-1 text-xs text-red-500">"*"</span>
                    })}
                </legend>
            })}
            {object.description.clone().map(|desc| view! {
                <p class="text-xs text-gray-500">{desc}</p>
            })}
            {object.children.into_iter().map(|(_, child)| view! {
                <Control node=child state=state />
            }).collect_view()}
        </fieldset>
    }
}
