//! レポート表示モデル
//!
//! AnalysisResultから表示用の値（ラベル・グラフ・表・推奨事項）を組み立てる。
//! 描画はCLI(テキスト/PDF)とWeb(Leptos)がそれぞれ行う。

use crate::types::{AnalysisResult, RecyclableStatus};

/// グラフの色（カテゴリ順に循環）
pub const CHART_COLORS: &[&str] = &["#10B981", "#3B82F6", "#F59E0B", "#EF4444", "#6B7280"];

/// 通貨記号（INR）
pub const CURRENCY_SYMBOL: &str = "₹";

/// リサイクル区分バッジ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Recyclable,
    Compost,
    Neutral,
}

impl BadgeStyle {
    pub fn for_status(status: &str) -> Self {
        match RecyclableStatus::classify(status) {
            RecyclableStatus::Yes => BadgeStyle::Recyclable,
            RecyclableStatus::Compost => BadgeStyle::Compost,
            RecyclableStatus::Other => BadgeStyle::Neutral,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeStyle::Recyclable => "badge badge-recyclable",
            BadgeStyle::Compost => "badge badge-compost",
            BadgeStyle::Neutral => "badge badge-neutral",
        }
    }
}

/// 円グラフの1区画
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub category: String,
    pub weight_grams: u32,
    /// 全体に占める割合（0.0-1.0）
    pub fraction: f64,
    pub color: &'static str,
}

/// 棒グラフの1本
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub category: String,
    pub weight_grams: u32,
    /// 最大値を1.0とした高さ
    pub height: f64,
}

/// 明細表の1行
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub category: String,
    pub weight_label: String,
    pub status: String,
    pub badge: BadgeStyle,
    pub notes: String,
}

/// レポート全体
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub category_count: usize,
    pub total_weight_grams: u32,
    pub total_weight_label: String,
    pub estimated_loss: f64,
    pub estimated_loss_label: String,
    pub cogs_rate_label: String,
    pub biggest_loss_category: String,
    pub slices: Vec<ChartSlice>,
    pub bars: Vec<ChartBar>,
    pub rows: Vec<TableRow>,
    pub recommendations: Vec<String>,
}

impl ReportView {
    pub fn build(result: &AnalysisResult) -> Self {
        let items = &result.waste_breakdown;
        let sum = result.breakdown_weight_grams();
        let max = items.iter().map(|item| item.weight_grams).max().unwrap_or(0);

        let slices = items
            .iter()
            .enumerate()
            .map(|(i, item)| ChartSlice {
                category: item.category.clone(),
                weight_grams: item.weight_grams,
                fraction: ratio(u64::from(item.weight_grams), sum),
                color: CHART_COLORS[i % CHART_COLORS.len()],
            })
            .collect();

        let bars = items
            .iter()
            .map(|item| ChartBar {
                category: item.category.clone(),
                weight_grams: item.weight_grams,
                height: ratio(u64::from(item.weight_grams), u64::from(max)),
            })
            .collect();

        let rows = items
            .iter()
            .map(|item| TableRow {
                category: item.category.clone(),
                weight_label: format_grams(item.weight_grams),
                status: item.recyclable_status.clone(),
                badge: BadgeStyle::for_status(&item.recyclable_status),
                notes: item.notes.clone(),
            })
            .collect();

        Self {
            category_count: items.len(),
            total_weight_grams: result.total_weight_grams,
            total_weight_label: format_grams(result.total_weight_grams),
            estimated_loss: result.financial_impact.estimated_loss,
            estimated_loss_label: format_currency(result.financial_impact.estimated_loss),
            cogs_rate_label: format_currency(result.financial_impact.cogs_rate),
            biggest_loss_category: result.manager_report.biggest_loss_category.clone(),
            slices,
            bars,
            rows,
            recommendations: result.manager_report.recommendations.clone(),
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// "500 g"
pub fn format_grams(grams: u32) -> String {
    format!("{} g", grams)
}

/// en-IN の通貨表記: ₹12,34,567.50
///
/// 下3桁の上は2桁区切り（インド式）。負数は先頭に "-"。
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            groups.push(&head[end - 2..end]);
            end -= 2;
        }
        groups.push(&head[..end]);
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    };

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, CURRENCY_SYMBOL, grouped, fraction)
}

/// ドーナツグラフの区画をSVGパスで返す
///
/// 角度は12時方向から時計回り。fractionが1.0なら2つの半円で閉じる。
pub fn donut_arc_path(cx: f64, cy: f64, outer: f64, inner: f64, start_fraction: f64, fraction: f64) -> String {
    use std::f64::consts::TAU;

    if fraction <= 0.0 {
        return String::new();
    }
    if fraction >= 0.9999 {
        return format!(
            "M {cx} {top} A {outer} {outer} 0 1 1 {cx} {bottom} A {outer} {outer} 0 1 1 {cx} {top} Z \
             M {cx} {itop} A {inner} {inner} 0 1 0 {cx} {ibottom} A {inner} {inner} 0 1 0 {cx} {itop} Z",
            cx = fmt_coord(cx),
            top = fmt_coord(cy - outer),
            bottom = fmt_coord(cy + outer),
            itop = fmt_coord(cy - inner),
            ibottom = fmt_coord(cy + inner),
            outer = fmt_coord(outer),
            inner = fmt_coord(inner),
        );
    }

    let point = |radius: f64, f: f64| {
        let angle = f * TAU;
        (cx + radius * angle.sin(), cy - radius * angle.cos())
    };
    let end_fraction = start_fraction + fraction;
    let large_arc = if fraction > 0.5 { 1 } else { 0 };

    let (x1, y1) = point(outer, start_fraction);
    let (x2, y2) = point(outer, end_fraction);
    let (x3, y3) = point(inner, end_fraction);
    let (x4, y4) = point(inner, start_fraction);

    format!(
        "M {} {} A {r} {r} 0 {large} 1 {} {} L {} {} A {ir} {ir} 0 {large} 0 {} {} Z",
        fmt_coord(x1),
        fmt_coord(y1),
        fmt_coord(x2),
        fmt_coord(y2),
        fmt_coord(x3),
        fmt_coord(y3),
        fmt_coord(x4),
        fmt_coord(y4),
        r = fmt_coord(outer),
        ir = fmt_coord(inner),
        large = large_arc,
    )
}

fn fmt_coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FinancialImpact, ManagerReport, WasteItem};

    fn item(category: &str, weight: u32, status: &str) -> WasteItem {
        WasteItem {
            category: category.into(),
            weight_grams: weight,
            recyclable_status: status.into(),
            notes: format!("{} notes", category),
        }
    }

    fn result(items: Vec<WasteItem>) -> AnalysisResult {
        let total = items.iter().map(|i| i.weight_grams).sum();
        AnalysisResult {
            waste_breakdown: items,
            total_weight_grams: total,
            financial_impact: FinancialImpact { cogs_rate: 0.5, estimated_loss: 250.0 },
            manager_report: ManagerReport {
                biggest_loss_category: "Food Scraps".into(),
                recommendations: vec![
                    "Reduce portion sizes".into(),
                    "Track plate waste daily".into(),
                    "Train staff on prep trimming".into(),
                ],
            },
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(250.0), "₹250.00");
        assert_eq!(format_currency(0.5), "₹0.50");
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(1234.5), "₹1,234.50");
        assert_eq!(format_currency(123456.0), "₹1,23,456.00");
        assert_eq!(format_currency(1234567.891), "₹12,34,567.89");
        assert_eq!(format_currency(-75.25), "-₹75.25");
    }

    #[test]
    fn test_format_grams() {
        assert_eq!(format_grams(500), "500 g");
    }

    #[test]
    fn test_single_item_scenario() {
        let view = ReportView::build(&result(vec![item("Food Scraps", 500, "Compost")]));
        assert_eq!(view.estimated_loss_label, "₹250.00");
        assert_eq!(view.cogs_rate_label, "₹0.50");
        assert_eq!(view.total_weight_label, "500 g");
        assert_eq!(view.category_count, 1);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].badge, BadgeStyle::Compost);
        assert_eq!(view.recommendations.len(), 3);
        assert!((view.slices[0].fraction - 1.0).abs() < 1e-9);
        assert!((view.bars[0].height - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_row_per_item_and_badges() {
        let items = vec![
            item("Plastic", 100, "YES"),
            item("Food Scraps", 300, "compost"),
            item("General Trash", 50, "No"),
            item("Mystery", 50, "unknown"),
            item("Plastic", 0, "yes"),
        ];
        let view = ReportView::build(&result(items));
        assert_eq!(view.rows.len(), 5);
        let badges: Vec<BadgeStyle> = view.rows.iter().map(|r| r.badge).collect();
        assert_eq!(
            badges,
            [
                BadgeStyle::Recyclable,
                BadgeStyle::Compost,
                BadgeStyle::Neutral,
                BadgeStyle::Neutral,
                BadgeStyle::Recyclable
            ]
        );
        // バッジ表示は元の表記のまま
        assert_eq!(view.rows[0].status, "YES");
    }

    #[test]
    fn test_slices_and_bars() {
        let items = vec![
            item("A", 100, "No"),
            item("B", 300, "No"),
            item("C", 0, "No"),
            item("D", 100, "No"),
            item("E", 100, "No"),
            item("F", 400, "No"),
        ];
        let view = ReportView::build(&result(items));
        let total: f64 = view.slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(view.slices[5].color, CHART_COLORS[0]);
        assert!((view.bars[5].height - 1.0).abs() < 1e-9);
        assert!((view.bars[0].height - 0.25).abs() < 1e-9);
        assert_eq!(view.bars[2].height, 0.0);
    }

    #[test]
    fn test_empty_breakdown() {
        let view = ReportView::build(&result(vec![]));
        assert_eq!(view.category_count, 0);
        assert!(view.rows.is_empty());
        assert!(view.slices.is_empty());
    }

    #[test]
    fn test_badge_css() {
        assert_eq!(BadgeStyle::for_status("Compost").css_class(), "badge badge-compost");
        assert_eq!(BadgeStyle::for_status("Yes").css_class(), "badge badge-recyclable");
        assert_eq!(BadgeStyle::for_status("No").css_class(), "badge badge-neutral");
    }

    #[test]
    fn test_donut_arc_path() {
        assert_eq!(donut_arc_path(50.0, 50.0, 40.0, 30.0, 0.0, 0.0), "");
        let quarter = donut_arc_path(50.0, 50.0, 40.0, 30.0, 0.0, 0.25);
        assert!(quarter.starts_with("M 50 10 A 40 40 0 0 1 90 50"));
        assert!(quarter.ends_with('Z'));
        let full = donut_arc_path(50.0, 50.0, 40.0, 30.0, 0.0, 1.0);
        assert!(full.contains("M 50 10"));
        assert!(full.contains("M 50 20"));
    }
}
