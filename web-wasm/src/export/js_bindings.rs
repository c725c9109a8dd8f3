//! JavaScript Bridge バインディング
//!
//! 画面キャプチャ（html2canvas）とPDF組み立て（jsPDF）をJavaScript側に委譲する。
//! 受け渡しはJSON文字列で行う。

use ecowaste_common::export::PageSlice;
use ecowaste_common::ExportLayout;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ============================================
// データ型定義
// ============================================

/// キャプチャ設定
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsCaptureOptions {
    pub scale: f32,
    pub use_cors: bool,
    pub logging: bool,
    pub background_color: String,
}

/// キャプチャ結果
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsCapturedImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

/// JavaScript側に渡すPDF組み立て計画
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsPdfPlan {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub pages: Vec<PageSlice>,
    pub file_name: String,
}

// ============================================
// 変換トレイト実装
// ============================================

impl From<&ExportLayout> for JsCaptureOptions {
    fn from(layout: &ExportLayout) -> Self {
        Self {
            scale: layout.scale,
            use_cors: true,
            logging: false,
            background_color: layout.background.to_string(),
        }
    }
}

impl JsPdfPlan {
    pub fn new(layout: &ExportLayout, pages: Vec<PageSlice>, file_name: String) -> Self {
        Self {
            page_width_mm: layout.page_width_mm,
            page_height_mm: layout.page_height_mm,
            pages,
            file_name,
        }
    }
}

// ============================================
// JavaScript関数のextern宣言
// ============================================

#[wasm_bindgen(module = "/js/report-export.js")]
extern "C" {
    /// 要素をキャプチャして `{ dataUrl, width, height }` を返す
    #[wasm_bindgen(js_name = "captureElement", catch)]
    pub async fn capture_element_js(element_id: &str, options_json: &str) -> Result<JsValue, JsValue>;

    /// キャプチャ画像をページごとに配置して保存
    #[wasm_bindgen(js_name = "buildPdf", catch)]
    pub fn build_pdf_js(image_data_url: &str, plan_json: &str) -> Result<(), JsValue>;
}

// ============================================
// ヘルパー関数
// ============================================

pub fn capture_options_to_json(layout: &ExportLayout) -> Result<String, String> {
    serde_json::to_string(&JsCaptureOptions::from(layout))
        .map_err(|e| format!("JSON serialization failed: {}", e))
}

pub fn plan_to_json(plan: &JsPdfPlan) -> Result<String, String> {
    serde_json::to_string(plan).map_err(|e| format!("JSON serialization failed: {}", e))
}
