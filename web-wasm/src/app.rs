//! メインアプリケーションコンポーネント

use crate::api::gemini::GeminiWebClient;
use crate::components::{
    analysis_report::AnalysisReport,
    analyzing::Analyzing,
    header::Header,
    upload_area::UploadArea,
};
use ecowaste_common::{analyze, EncodedImage, ViewEvent, ViewState};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// 画像を受け取り、状態を Analyzing に進めて解析を開始する
fn start_analysis(state: RwSignal<ViewState>, data_url: String) {
    let image = match EncodedImage::parse(&data_url) {
        Ok(image) => image,
        Err(e) => {
            gloo::console::warn!(format!("ignoring upload: {}", e));
            return;
        }
    };

    let mut accepted = false;
    state.update(|s| match s.apply(ViewEvent::ImageSelected(image.clone())) {
        Ok(()) => accepted = true,
        Err(e) => gloo::console::warn!(e.to_string()),
    });
    if !accepted {
        return;
    }

    spawn_local(async move {
        let client = GeminiWebClient::from_build_env();
        let outcome = analyze(&client, image.as_str()).await;
        if let Err(failure) = &outcome {
            gloo::console::error!(format!("analysis failed: {}", failure.cause()));
        }
        state.update(|s| {
            if let Err(e) = s.resolve(outcome) {
                gloo::console::warn!(e.to_string());
            }
        });
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(ViewState::default());

    let is_busy = Signal::derive(move || state.with(ViewState::is_busy));
    let error = move || state.with(|s| s.error_message().map(str::to_string));
    let has_result = move || state.with(|s| s.result().is_some());

    let on_image_selected = move |data_url: String| start_analysis(state, data_url);

    view! {
        <div class="container">
            <Header />

            <main class="main">
                <Show
                    when=move || !has_result()
                    fallback=move || view! { <AnalysisReport state=state /> }
                >
                    <section class="hero">
                        <h2>"Turn Waste into " <span class="accent">"Savings"</span></h2>
                        <p class="text-muted">
                            "Upload a photo of your restaurant's food waste. Our AI Consultant will analyze contents, "
                            "estimate financial loss, and provide actionable reduction strategies in seconds."
                        </p>
                    </section>

                    {move || error().map(|message| view! {
                        <div class="error-banner" role="alert">"⚠ " {message}</div>
                    })}

                    <UploadArea is_busy=is_busy on_image_selected=on_image_selected />

                    <Show when=move || is_busy.get()>
                        <Analyzing />
                    </Show>
                </Show>
            </main>

            <footer class="footer">
                <p class="text-muted">"EcoWaste AI Solutions"</p>
                <span class="text-muted">"Powered by Gemini 2.5 Flash"</span>
            </footer>
        </div>
    }
}
