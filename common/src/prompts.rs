//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有される固定プロンプトと出力スキーマ:
//! - SYSTEM_INSTRUCTION: 分類ルールと原価前提
//! - USER_INSTRUCTION: 画像に添える依頼文
//! - response_schema: Gemini構造化出力スキーマ

use serde_json::{json, Value};

/// デフォルトモデル
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini APIベースURL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// システム指示（分類ルール・重量推定・損失計算）
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert Waste Management Consultant and Data Analyst specializing in optimizing restaurant operations.
Your task is to analyze an uploaded photo of mixed kitchen/plate waste, categorize it, estimate its weight, calculate financial loss, and provide actionable reduction advice.

Follow this logic for classification:
1. Food Scraps (Organic): Unconsumed food, prep trimmings (high loss focus).
2. Cardboard/Paper: Packaging, napkins.
3. Plastic: Single-use containers, films, bags.
4. Glass/Metal: Jars, cans.
5. General Trash/Other: Non-recyclable, non-compostable.

Crucial Step: Estimate weight in grams (g) based on visual cues (density, container size).
Financial Calculation: Assume COGS of ₹0.50 per gram for Food Scraps.

Return strictly valid JSON."#;

/// ユーザー指示
pub const USER_INSTRUCTION: &str = "Analyze this image of restaurant waste. Provide a detailed classification, weight estimation, financial impact analysis, and a manager's reduction report based on the visible items.";

/// AnalysisResultに対応する出力スキーマ
///
/// 整数（重量）と数値（金額）を区別し、必須フィールドを全列挙する。
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "wasteBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": { "type": "STRING", "description": "Category name (e.g., Food Scraps, Plastic)" },
                        "weightGrams": { "type": "INTEGER", "description": "Estimated weight in grams" },
                        "recyclableStatus": { "type": "STRING", "description": "Yes, No, or Compost" },
                        "notes": { "type": "STRING", "description": "Examples seen in image (e.g., half-eaten fries)" }
                    },
                    "required": ["category", "weightGrams", "recyclableStatus", "notes"]
                }
            },
            "totalWeightGrams": { "type": "INTEGER" },
            "financialImpact": {
                "type": "OBJECT",
                "properties": {
                    "cogsRate": { "type": "NUMBER", "description": "Fixed at 0.50" },
                    "estimatedLoss": { "type": "NUMBER", "description": "Total financial loss from Food Scraps" }
                },
                "required": ["cogsRate", "estimatedLoss"]
            },
            "managerReport": {
                "type": "OBJECT",
                "properties": {
                    "biggestLossCategory": { "type": "STRING" },
                    "recommendations": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "3 specific actionable recommendations"
                    }
                },
                "required": ["biggestLossCategory", "recommendations"]
            }
        },
        "required": ["wasteBreakdown", "totalWeightGrams", "financialImpact", "managerReport"]
    })
}
