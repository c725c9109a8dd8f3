//! アップロードエリアコンポーネント
//!
//! 画像を1枚だけ受け付け、data URLとして親に渡す。解析中は無効。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, FileReader, HtmlInputElement, ProgressEvent};

#[component]
pub fn UploadArea<F>(
    #[prop(into)] is_busy: Signal<bool>,
    on_image_selected: F,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_image_selected = on_image_selected.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            set_is_dragover.set(false);

            if is_busy.get_untracked() {
                return;
            }

            // 先頭の1枚のみ
            let file = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0));
            if let Some(file) = file {
                if let Err(e) = read_file(file, on_image_selected.clone()) {
                    gloo::console::error!("failed to read dropped file", e);
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if !is_busy.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = {
        let on_image_selected = on_image_selected.clone();
        move |_| {
            if is_busy.get_untracked() {
                return;
            }

            let on_image_selected = on_image_selected.clone();
            let opened = open_file_dialog(move |file| {
                if let Err(e) = read_file(file, on_image_selected.clone()) {
                    gloo::console::error!("failed to read selected file", e);
                }
            });
            if let Err(e) = opened {
                gloo::console::error!("failed to open file dialog", e);
            }
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if is_busy.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <div class="upload-icon">{move || if is_busy.get() { "⏳" } else { "📤" }}</div>
            <h3>{move || if is_busy.get() { "Analyzing Waste..." } else { "Upload Waste Photo" }}</h3>
            <p class="text-muted">
                "Drag and drop your image here, or click to browse. We accept JPEG and PNG."
            </p>
            <button
                class="btn btn-primary"
                disabled=move || is_busy.get()
                on:click=on_click
            >
                "Select File"
            </button>
        </div>

        <Show when=move || !is_busy.get()>
            <div class="steps">
                <div class="step">
                    <span class="step-icon">"📸"</span>
                    <p>"Snap a Photo"</p>
                    <p class="text-muted">"Capture the full waste bin"</p>
                </div>
                <div class="step">
                    <span class="step-icon">"🤖"</span>
                    <p>"AI Analysis"</p>
                    <p class="text-muted">"Identify items & weights"</p>
                </div>
                <div class="step">
                    <span class="step-icon">"💰"</span>
                    <p>"Get Report"</p>
                    <p class="text-muted">"View costs & tips"</p>
                </div>
            </div>
        </Show>
    }
}

/// ファイル選択ダイアログを開く
fn open_file_dialog<F>(on_file: F) -> Result<(), JsValue>
where
    F: Fn(File) + 'static,
{
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("file");
    input.set_accept("image/*");

    let input_clone = input.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(file) = input_clone.files().and_then(|files| files.get(0)) {
            on_file(file);
        }
    }) as Box<dyn FnMut(_)>);

    input.set_onchange(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    input.click();
    Ok(())
}

fn read_file<F>(file: File, on_loaded: F) -> Result<(), JsValue>
where
    F: Fn(String) + 'static,
{
    let reader = FileReader::new()?;

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: ProgressEvent| {
        match reader_clone.result().ok().and_then(|result| result.as_string()) {
            Some(data_url) => on_loaded(data_url),
            None => gloo::console::warn!("FileReader returned no data URL"),
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onloadend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    reader.read_as_data_url(&file)
}
