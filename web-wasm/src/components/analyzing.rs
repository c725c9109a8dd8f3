//! 解析中インジケーター

use leptos::prelude::*;

#[component]
pub fn Analyzing() -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="spinner" />
            <p class="progress-text">"Analyzing waste composition..."</p>
        </div>
    }
}
