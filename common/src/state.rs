//! 画面状態マシン
//!
//! Idle → Analyzing → Success / Error の4フェーズをタグ付きenumで表す。
//! フェーズごとに持てるデータが決まるため、「Errorなのに結果がある」等は作れない。

use crate::analysis::AnalysisFailure;
use crate::encoding::EncodedImage;
use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// 画面フェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Analyzing,
    Success,
    Error,
}

impl ViewPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewPhase::Idle => "idle",
            ViewPhase::Analyzing => "analyzing",
            ViewPhase::Success => "success",
            ViewPhase::Error => "error",
        }
    }
}

/// 画面状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Analyzing {
        image: EncodedImage,
    },
    Success {
        image: EncodedImage,
        result: AnalysisResult,
    },
    Error {
        image: EncodedImage,
        message: String,
    },
}

/// 状態遷移イベント
#[derive(Debug, Clone)]
pub enum ViewEvent {
    ImageSelected(EncodedImage),
    AnalysisSucceeded(AnalysisResult),
    AnalysisFailed(String),
    Reset,
}

impl ViewEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewEvent::ImageSelected(_) => "image-selected",
            ViewEvent::AnalysisSucceeded(_) => "analysis-succeeded",
            ViewEvent::AnalysisFailed(_) => "analysis-failed",
            ViewEvent::Reset => "reset",
        }
    }
}

impl ViewState {
    pub fn phase(&self) -> ViewPhase {
        match self {
            ViewState::Idle => ViewPhase::Idle,
            ViewState::Analyzing { .. } => ViewPhase::Analyzing,
            ViewState::Success { .. } => ViewPhase::Success,
            ViewState::Error { .. } => ViewPhase::Error,
        }
    }

    /// イベントを適用する
    ///
    /// 許可されない遷移は `Error::InvalidTransition` を返し、状態は変えない。
    /// Successからの再アップロードは一度Resetを経由する。
    pub fn apply(&mut self, event: ViewEvent) -> Result<()> {
        let phase = self.phase();
        let next = match (std::mem::take(self), event) {
            (ViewState::Idle | ViewState::Error { .. }, ViewEvent::ImageSelected(image)) => {
                ViewState::Analyzing { image }
            }
            (ViewState::Analyzing { image }, ViewEvent::AnalysisSucceeded(result)) => {
                ViewState::Success { image, result }
            }
            (ViewState::Analyzing { image }, ViewEvent::AnalysisFailed(message)) => {
                ViewState::Error { image, message }
            }
            (ViewState::Idle | ViewState::Success { .. } | ViewState::Error { .. }, ViewEvent::Reset) => {
                ViewState::Idle
            }
            (previous, event) => {
                *self = previous;
                return Err(Error::InvalidTransition {
                    phase: phase.as_str(),
                    event: event.as_str(),
                });
            }
        };
        tracing::debug!(from = phase.as_str(), to = next.phase().as_str(), "view state transition");
        *self = next;
        Ok(())
    }

    /// 解析完了（成功/失敗）を反映
    pub fn resolve(&mut self, outcome: std::result::Result<AnalysisResult, AnalysisFailure>) -> Result<()> {
        match outcome {
            Ok(result) => self.apply(ViewEvent::AnalysisSucceeded(result)),
            Err(failure) => self.apply(ViewEvent::AnalysisFailed(failure.user_message().to_string())),
        }
    }

    pub fn uploaded_image(&self) -> Option<&EncodedImage> {
        match self {
            ViewState::Idle => None,
            ViewState::Analyzing { image }
            | ViewState::Success { image, .. }
            | ViewState::Error { image, .. } => Some(image),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            ViewState::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// 解析中はアップロードを受け付けない
    pub fn is_busy(&self) -> bool {
        matches!(self, ViewState::Analyzing { .. })
    }

    pub fn accepts_upload(&self) -> bool {
        matches!(self, ViewState::Idle | ViewState::Error { .. })
    }
}
