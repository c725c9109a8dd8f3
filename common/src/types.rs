//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - WasteItem: 廃棄物カテゴリ1行分
//! - FinancialImpact / ManagerReport: 損失見積りと改善レポート
//! - AnalysisResult: AIモデルから返る最終出力

use serde::{Deserialize, Serialize};

/// Food Scraps 1gあたりの原価（COGS）
pub const COGS_RATE_PER_GRAM: f64 = 0.50;

/// 分類の基本カテゴリ（プロンプトに埋め込む）
pub const WASTE_CATEGORIES: &[&str] = &[
    "Food Scraps (Organic)",
    "Cardboard/Paper",
    "Plastic",
    "Glass/Metal",
    "General Trash/Other",
];

/// 廃棄物の内訳1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteItem {
    pub category: String,
    pub weight_grams: u32,
    /// "Yes" / "No" / "Compost"（大文字小文字は不問）
    pub recyclable_status: String,
    /// 画像内で見つかった具体例
    pub notes: String,
}

impl WasteItem {
    pub fn recyclable(&self) -> RecyclableStatus {
        RecyclableStatus::classify(&self.recyclable_status)
    }

    /// Food Scraps系カテゴリか（損失計算の対象）
    pub fn is_food_scraps(&self) -> bool {
        let lower = self.category.to_lowercase();
        lower.contains("food") || lower.contains("organic")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialImpact {
    pub cogs_rate: f64,
    pub estimated_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerReport {
    pub biggest_loss_category: String,
    pub recommendations: Vec<String>,
}

/// AI解析結果
///
/// 一度生成されたら変更しない。全フィールド必須で、欠けていればパースエラー。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub waste_breakdown: Vec<WasteItem>,
    pub total_weight_grams: u32,
    pub financial_impact: FinancialImpact,
    pub manager_report: ManagerReport,
}

impl AnalysisResult {
    /// 内訳の重量合計（g）
    pub fn breakdown_weight_grams(&self) -> u64 {
        self.waste_breakdown.iter().map(|item| u64::from(item.weight_grams)).sum()
    }

    /// Food Scraps系カテゴリの重量合計（g）
    pub fn food_scraps_weight_grams(&self) -> u64 {
        self.waste_breakdown
            .iter()
            .filter(|item| item.is_food_scraps())
            .map(|item| u64::from(item.weight_grams))
            .sum()
    }
}

/// リサイクル区分（バッジ表示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecyclableStatus {
    Yes,
    Compost,
    Other,
}

impl RecyclableStatus {
    /// 自由記述の区分を大文字小文字を無視して判定
    pub fn classify(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "yes" => RecyclableStatus::Yes,
            "compost" => RecyclableStatus::Compost,
            _ => RecyclableStatus::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "wasteBreakdown": [
                {"category": "Food Scraps", "weightGrams": 500, "recyclableStatus": "Compost", "notes": "half-eaten fries"},
                {"category": "Plastic", "weightGrams": 120, "recyclableStatus": "Yes", "notes": "cling film"}
            ],
            "totalWeightGrams": 620,
            "financialImpact": {"cogsRate": 0.5, "estimatedLoss": 250},
            "managerReport": {
                "biggestLossCategory": "Food Scraps",
                "recommendations": ["Reduce portion sizes", "Track plate waste daily", "Train staff on prep trimming"]
            }
        }"#
    }

    #[test]
    fn test_analysis_result_deserialize() {
        let result: AnalysisResult = serde_json::from_str(sample_json()).expect("デシリアライズ失敗");
        assert_eq!(result.waste_breakdown.len(), 2);
        assert_eq!(result.waste_breakdown[0].weight_grams, 500);
        assert_eq!(result.total_weight_grams, 620);
        assert!((result.financial_impact.estimated_loss - 250.0).abs() < f64::EPSILON);
        assert_eq!(result.manager_report.recommendations.len(), 3);
    }

    #[test]
    fn test_analysis_result_missing_field_is_error() {
        let json = r#"{"wasteBreakdown": [], "totalWeightGrams": 0}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let json = r#"{"category": "Plastic", "weightGrams": -5, "recyclableStatus": "Yes", "notes": ""}"#;
        assert!(serde_json::from_str::<WasteItem>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let result: AnalysisResult = serde_json::from_str(sample_json()).unwrap();
        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"wasteBreakdown\""));
        assert!(json.contains("\"weightGrams\":500"));
        assert!(json.contains("\"biggestLossCategory\":\"Food Scraps\""));
    }

    #[test]
    fn test_weight_sums() {
        let result: AnalysisResult = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(result.breakdown_weight_grams(), 620);
        assert_eq!(result.food_scraps_weight_grams(), 500);
    }

    #[test]
    fn test_recyclable_status_case_insensitive() {
        assert_eq!(RecyclableStatus::classify("YES"), RecyclableStatus::Yes);
        assert_eq!(RecyclableStatus::classify(" yes "), RecyclableStatus::Yes);
        assert_eq!(RecyclableStatus::classify("compost"), RecyclableStatus::Compost);
        assert_eq!(RecyclableStatus::classify("Compost"), RecyclableStatus::Compost);
        assert_eq!(RecyclableStatus::classify("No"), RecyclableStatus::Other);
        assert_eq!(RecyclableStatus::classify("maybe"), RecyclableStatus::Other);
        assert_eq!(RecyclableStatus::classify(""), RecyclableStatus::Other);
    }
}
