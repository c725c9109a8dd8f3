//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="brand">
                <span class="brand-icon">"🌱"</span>
                <div>
                    <h1>"EcoWaste " <span class="accent">"AI"</span></h1>
                    <p class="text-muted">"Smart Restaurant Waste Consultant"</p>
                </div>
            </div>
            <span class="version">{concat!("v", env!("CARGO_PKG_VERSION"))}</span>
        </header>
    }
}
