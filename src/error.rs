use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoWasteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API key is not set. Export GEMINI_API_KEY or run `ecowaste config --set-api-key YOUR_KEY`")]
    MissingApiKey,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Not a supported image: {0}")]
    UnsupportedImage(String),

    #[error("Image load error: {0}")]
    ImageLoad(String),

    /// 利用者向けの固定メッセージのみを表示
    #[error(transparent)]
    Analysis(#[from] ecowaste_common::AnalysisFailure),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] ecowaste_common::Error),
}

pub type Result<T> = std::result::Result<T, EcoWasteError>;
