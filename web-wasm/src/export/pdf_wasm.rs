//! PDF生成（WASM版）
//!
//! 表示中のレポート要素を画像化し、A4縦に分割して保存する。

use crate::export::js_bindings::{
    build_pdf_js, capture_element_js, capture_options_to_json, plan_to_json, JsCapturedImage,
    JsPdfPlan,
};
use ecowaste_common::export::{export_file_name, paginate};
use ecowaste_common::ExportLayout;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// 今日の日付（ローカル時刻）でファイル名を決める
fn today_file_name() -> String {
    let now = js_sys::Date::new_0();
    export_file_name(now.get_date(), now.get_month() + 1, now.get_full_year() as i32)
}

/// レポート要素をPDFにして保存し、ファイル名を返す
pub async fn export_report_pdf(element_id: &str) -> Result<String, String> {
    let layout = ExportLayout::a4_portrait();

    let window = web_sys::window().ok_or("window unavailable")?;
    window.scroll_to_with_x_and_y(0.0, 0.0);
    TimeoutFuture::new(layout.settle_delay_ms).await;

    let options = capture_options_to_json(&layout)?;
    let captured = capture_element_js(element_id, &options)
        .await
        .map_err(|e| format!("capture failed: {}", js_error(e)))?;
    let captured: JsCapturedImage =
        serde_wasm_bindgen::from_value(captured).map_err(|e| e.to_string())?;

    let pages = paginate(captured.width, captured.height, &layout);
    let plan = JsPdfPlan::new(&layout, pages, today_file_name());
    let plan_json = plan_to_json(&plan)?;

    build_pdf_js(&captured.data_url, &plan_json)
        .map_err(|e| format!("PDF generation failed: {}", js_error(e)))?;

    Ok(plan.file_name)
}
