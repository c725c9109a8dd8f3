mod gemini;

pub use gemini::GeminiClient;

use crate::capture;
use crate::error::Result;
use ecowaste_common::{analyze, ViewEvent, ViewState, VisionModel};
use std::path::Path;

/// 画像ファイルを読み込み、状態マシンを通して解析する
///
/// 戻り値の状態は Success か Error のどちらか。
pub async fn analyze_file<M: VisionModel>(model: &M, image_path: &Path) -> Result<ViewState> {
    let image = capture::encode_file(image_path)?;
    let mut state = ViewState::default();
    state.apply(ViewEvent::ImageSelected(image.clone()))?;

    let outcome = analyze(model, image.as_str()).await;
    state.resolve(outcome)?;
    Ok(state)
}
