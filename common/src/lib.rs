//! EcoWaste AI Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ

pub mod types;
pub mod layout;
pub mod error;
pub mod encoding;
pub mod prompts;
pub mod gemini;
pub mod parser;
pub mod analysis;
pub mod state;
pub mod report;
pub mod busy;
pub mod export;

pub use types::{AnalysisResult, FinancialImpact, ManagerReport, RecyclableStatus, WasteItem};
pub use layout::ExportLayout;
pub use error::{Error, Result};
pub use encoding::EncodedImage;
pub use parser::{consistency_warnings, extract_json, parse_analysis_response, ConsistencyWarning};
pub use analysis::{
    analyze, AnalysisFailure, AnalysisRequest, FailureCause, ModelError, VisionModel,
    ANALYSIS_FAILURE_MESSAGE,
};
pub use state::{ViewEvent, ViewPhase, ViewState};
pub use report::{format_currency, BadgeStyle, ReportView};
pub use busy::BusyGuard;
