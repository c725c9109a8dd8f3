//! APIレスポンスパーサー
//!
//! AIモデルの応答テキストからJSONを抽出し、AnalysisResultにパースする。
//! 数値の整合性は検証せず、診断用の警告だけを返す。

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, COGS_RATE_PER_GRAM};

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use ecowaste_common::extract_json;
///
/// let response = "Result: {\"totalWeightGrams\": 10}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"totalWeightGrams\": 10}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7;
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSON object not found".into()))
}

/// 解析レスポンスをパース
///
/// * 空テキスト → `Error::EmptyResponse`
/// * JSONなし/形が違う → `Error::Parse`
pub fn parse_analysis_response(response: &str) -> Result<AnalysisResult> {
    if response.trim().is_empty() {
        return Err(Error::EmptyResponse);
    }

    let json_str = extract_json(response)?;
    serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("analysis JSON: {}", e)))
}

/// 整合性チェックの警告
#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyWarning {
    TotalWeightMismatch { reported: u32, summed: u64 },
    EstimatedLossMismatch { reported: f64, expected: f64 },
    UnexpectedCogsRate(f64),
    UnknownBiggestLossCategory(String),
    RecommendationCount(usize),
}

impl std::fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsistencyWarning::TotalWeightMismatch { reported, summed } => {
                write!(f, "totalWeightGrams {} != item sum {}", reported, summed)
            }
            ConsistencyWarning::EstimatedLossMismatch { reported, expected } => {
                write!(f, "estimatedLoss {:.2} != expected {:.2}", reported, expected)
            }
            ConsistencyWarning::UnexpectedCogsRate(rate) => write!(f, "cogsRate {} != {}", rate, COGS_RATE_PER_GRAM),
            ConsistencyWarning::UnknownBiggestLossCategory(name) => {
                write!(f, "biggestLossCategory '{}' not in breakdown", name)
            }
            ConsistencyWarning::RecommendationCount(n) => write!(f, "{} recommendations (expected 3)", n),
        }
    }
}

/// 金額比較の許容誤差
const LOSS_TOLERANCE: f64 = 0.01;

/// 数値の整合性を確認（結果は棄却しない）
pub fn consistency_warnings(result: &AnalysisResult) -> Vec<ConsistencyWarning> {
    let mut warnings = Vec::new();

    let summed = result.breakdown_weight_grams();
    if u64::from(result.total_weight_grams) != summed {
        warnings.push(ConsistencyWarning::TotalWeightMismatch {
            reported: result.total_weight_grams,
            summed,
        });
    }

    let impact = &result.financial_impact;
    if (impact.cogs_rate - COGS_RATE_PER_GRAM).abs() > f64::EPSILON {
        warnings.push(ConsistencyWarning::UnexpectedCogsRate(impact.cogs_rate));
    }

    let expected = impact.cogs_rate * result.food_scraps_weight_grams() as f64;
    if (impact.estimated_loss - expected).abs() > LOSS_TOLERANCE {
        warnings.push(ConsistencyWarning::EstimatedLossMismatch {
            reported: impact.estimated_loss,
            expected,
        });
    }

    let biggest = result.manager_report.biggest_loss_category.trim();
    let known = result
        .waste_breakdown
        .iter()
        .any(|item| item.category.trim().eq_ignore_ascii_case(biggest));
    if !known {
        warnings.push(ConsistencyWarning::UnknownBiggestLossCategory(biggest.to_string()));
    }

    let count = result.manager_report.recommendations.len();
    if count != 3 {
        warnings.push(ConsistencyWarning::RecommendationCount(count));
    }

    warnings
}
