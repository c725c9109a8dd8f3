//! 解析クライアント
//!
//! 外部モデル呼び出しを `VisionModel` ポートとして抽象化し、
//! 画像1枚 → AnalysisResult の1往復だけを扱う。
//! 失敗はすべて `AnalysisFailure`（利用者向けの固定メッセージ）に畳み込む。

use std::future::Future;

use thiserror::Error;

use crate::encoding::EncodedImage;
use crate::error::Error;
use crate::parser::{consistency_warnings, parse_analysis_response};
use crate::prompts::{response_schema, SYSTEM_INSTRUCTION, USER_INSTRUCTION};
use crate::types::AnalysisResult;

/// 利用者に表示する唯一の失敗メッセージ
pub const ANALYSIS_FAILURE_MESSAGE: &str = "Failed to analyze the image. Please try again.";

/// 外部モデルへ渡すリクエスト
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub system_instruction: String,
    pub user_instruction: String,
    pub mime_type: String,
    /// プレフィックスを除いたBase64本体
    pub image_base64: String,
    pub response_schema: serde_json::Value,
}

impl AnalysisRequest {
    pub fn for_image(image: &EncodedImage) -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            user_instruction: USER_INSTRUCTION.to_string(),
            mime_type: image.mime_type().to_string(),
            image_base64: image.payload().to_string(),
            response_schema: response_schema(),
        }
    }
}

/// 外部モデル呼び出しのエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode API response: {0}")]
    Decode(String),
}

/// 外部モデルのポート
///
/// 応答テキスト（JSON文字列）を返す。空応答は空文字列で返してよい。
/// WASMのfetch実装でも使えるよう `Send` は要求しない。
pub trait VisionModel {
    fn generate(&self, request: &AnalysisRequest) -> impl Future<Output = Result<String, ModelError>>;
}

/// 失敗の内部原因（ログ専用）
#[derive(Debug)]
pub enum FailureCause {
    InvalidImage(Error),
    Model(ModelError),
    EmptyResponse,
    Malformed(Error),
}

impl std::fmt::Display for FailureCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureCause::InvalidImage(e) => write!(f, "invalid image: {}", e),
            FailureCause::Model(e) => write!(f, "model call failed: {}", e),
            FailureCause::EmptyResponse => write!(f, "model returned an empty response"),
            FailureCause::Malformed(e) => write!(f, "malformed response: {}", e),
        }
    }
}

/// 解析失敗
///
/// Displayは原因にかかわらず `ANALYSIS_FAILURE_MESSAGE`。
#[derive(Error, Debug)]
#[error("{}", ANALYSIS_FAILURE_MESSAGE)]
pub struct AnalysisFailure {
    cause: FailureCause,
}

impl AnalysisFailure {
    pub fn new(cause: FailureCause) -> Self {
        Self { cause }
    }

    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }

    /// 利用者向けメッセージ
    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILURE_MESSAGE
    }

    pub fn is_missing_api_key(&self) -> bool {
        matches!(self.cause, FailureCause::Model(ModelError::MissingApiKey))
    }
}

/// 画像1枚を解析する
///
/// # Arguments
/// * `model` - 外部モデルのポート実装
/// * `encoded_image` - "data:<mime>;base64,<payload>" 形式の文字列
pub async fn analyze<M: VisionModel>(
    model: &M,
    encoded_image: &str,
) -> Result<AnalysisResult, AnalysisFailure> {
    let result = run(model, encoded_image).await;
    match &result {
        Ok(analysis) => {
            for warning in consistency_warnings(analysis) {
                tracing::warn!("analysis result inconsistency: {}", warning);
            }
        }
        Err(failure) => tracing::error!("waste analysis failed: {}", failure.cause()),
    }
    result
}

async fn run<M: VisionModel>(model: &M, encoded_image: &str) -> Result<AnalysisResult, AnalysisFailure> {
    let image = EncodedImage::parse(encoded_image)
        .map_err(|e| AnalysisFailure::new(FailureCause::InvalidImage(e)))?;
    let request = AnalysisRequest::for_image(&image);

    tracing::debug!(mime_type = %request.mime_type, bytes = request.image_base64.len(), "sending analysis request");

    let text = model
        .generate(&request)
        .await
        .map_err(|e| AnalysisFailure::new(FailureCause::Model(e)))?;

    parse_analysis_response(&text).map_err(|e| match e {
        Error::EmptyResponse => AnalysisFailure::new(FailureCause::EmptyResponse),
        other => AnalysisFailure::new(FailureCause::Malformed(other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

    /// 固定応答を返すスタブ
    struct StubModel {
        reply: Result<String, ModelError>,
        seen: RefCell<Vec<AnalysisRequest>>,
    }

    impl StubModel {
        fn new(reply: Result<String, ModelError>) -> Self {
            Self { reply, seen: RefCell::new(Vec::new()) }
        }
    }

    impl VisionModel for StubModel {
        async fn generate(&self, request: &AnalysisRequest) -> Result<String, ModelError> {
            self.seen.borrow_mut().push(request.clone());
            self.reply.clone()
        }
    }

    const VALID: &str = r#"{
        "wasteBreakdown": [{"category": "Food Scraps", "weightGrams": 500, "recyclableStatus": "Compost", "notes": "half-eaten fries"}],
        "totalWeightGrams": 500,
        "financialImpact": {"cogsRate": 0.5, "estimatedLoss": 250},
        "managerReport": {"biggestLossCategory": "Food Scraps", "recommendations": ["a", "b", "c"]}
    }"#;

    #[test]
    fn test_analyze_success_strips_prefix() {
        let model = StubModel::new(Ok(VALID.to_string()));
        let result = block_on(analyze(&model, IMAGE)).expect("解析失敗");
        assert_eq!(result.total_weight_grams, 500);

        let seen = model.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].image_base64, "iVBORw0KGgo=");
        assert_eq!(seen[0].mime_type, "image/png");
        assert_eq!(seen[0].system_instruction, SYSTEM_INSTRUCTION);
    }

    #[test]
    fn test_analyze_model_error_is_generic() {
        let causes = [
            ModelError::Transport("connection reset".into()),
            ModelError::Status { status: 429, body: "quota exceeded".into() },
            ModelError::MissingApiKey,
        ];
        for cause in causes {
            let model = StubModel::new(Err(cause));
            let failure = block_on(analyze(&model, IMAGE)).unwrap_err();
            assert_eq!(failure.to_string(), ANALYSIS_FAILURE_MESSAGE);
            assert!(matches!(failure.cause(), FailureCause::Model(_)));
        }
    }

    #[test]
    fn test_analyze_empty_response() {
        let model = StubModel::new(Ok(String::new()));
        let failure = block_on(analyze(&model, IMAGE)).unwrap_err();
        assert!(matches!(failure.cause(), FailureCause::EmptyResponse));
        assert_eq!(failure.to_string(), ANALYSIS_FAILURE_MESSAGE);
    }

    #[test]
    fn test_analyze_malformed_response() {
        let model = StubModel::new(Ok("{\"wasteBreakdown\": 3}".to_string()));
        let failure = block_on(analyze(&model, IMAGE)).unwrap_err();
        assert!(matches!(failure.cause(), FailureCause::Malformed(_)));
        assert_eq!(failure.user_message(), ANALYSIS_FAILURE_MESSAGE);
    }

    #[test]
    fn test_analyze_invalid_image_skips_model() {
        let model = StubModel::new(Ok(VALID.to_string()));
        let failure = block_on(analyze(&model, "no-prefix-here")).unwrap_err();
        assert!(matches!(failure.cause(), FailureCause::InvalidImage(_)));
        assert!(model.seen.borrow().is_empty());
    }

    #[test]
    fn test_missing_api_key_flag() {
        let model = StubModel::new(Err(ModelError::MissingApiKey));
        let failure = block_on(analyze(&model, IMAGE)).unwrap_err();
        assert!(failure.is_missing_api_key());
    }
}
