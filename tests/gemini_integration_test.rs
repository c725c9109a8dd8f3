//! 実APIを使う統合テスト（GEMINI_API_KEYが無ければスキップ）

use ecowaste_ai::analyzer::{analyze_file, GeminiClient};
use ecowaste_common::prompts::{DEFAULT_MODEL, GEMINI_API_BASE};
use tempfile::tempdir;

#[tokio::test]
async fn gemini_analysis_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };

    let dir = tempdir().unwrap();
    let path = dir.path().join("bin.png");
    image::RgbImage::from_pixel(32, 32, image::Rgb([90, 60, 30]))
        .save(&path)
        .unwrap();

    let client = GeminiClient::new(Some(api_key), DEFAULT_MODEL, GEMINI_API_BASE);
    let state = analyze_file(&client, &path).await.unwrap();

    if let Some(message) = state.error_message() {
        panic!("analysis failed: {}", message);
    }
    let result = state.result().expect("success state");
    assert!(result.manager_report.recommendations.len() <= 5);
}
