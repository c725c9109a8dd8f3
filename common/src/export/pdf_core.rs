//! PDF export core utilities shared by CLI/WASM.
//!
//! ReportViewをページ非依存のブロック列にし、行の高さからページ送りを決める。

use crate::layout::{mm_to_pt, ExportLayout};
use crate::report::{BadgeStyle, ReportView};

/// PDF描画で使用するレイアウト計算結果（pt単位）
#[derive(Debug, Clone)]
pub struct PdfLayoutCore {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub heading_size_pt: f32,
    pub body_size_pt: f32,
    pub line_gap_pt: f32,
    pub block_gap_pt: f32,
    pub bar_max_width_pt: f32,
    pub label_width_pt: f32,
}

impl PdfLayoutCore {
    pub fn from_layout(layout: &ExportLayout) -> Self {
        let page_width_pt = mm_to_pt(layout.page_width_mm);
        let margin_pt = mm_to_pt(layout.margin_mm);
        let label_width_pt = 150.0;
        let usable = page_width_pt - margin_pt * 2.0;

        Self {
            page_width_pt,
            page_height_pt: mm_to_pt(layout.page_height_mm),
            margin_pt,
            heading_size_pt: 14.0,
            body_size_pt: 10.0,
            line_gap_pt: 4.0,
            block_gap_pt: 14.0,
            bar_max_width_pt: usable - label_width_pt - 70.0,
            label_width_pt,
        }
    }

    /// 本文の上端（pt、PDF座標は下から）
    pub fn content_top_pt(&self) -> f32 {
        self.page_height_pt - self.margin_pt
    }

    /// 本文の下端（pt）
    pub fn content_bottom_pt(&self) -> f32 {
        self.margin_pt
    }

    /// 1ページに入る本文の高さ（pt）
    pub fn content_height_pt(&self) -> f32 {
        self.content_top_pt() - self.content_bottom_pt()
    }

    pub fn line_height_pt(&self, line: &PdfLine) -> f32 {
        match line {
            PdfLine::Heading(_) => self.heading_size_pt + self.line_gap_pt * 2.0,
            PdfLine::Photo { height_pt } => height_pt + self.line_gap_pt,
            _ => self.body_size_pt + self.line_gap_pt,
        }
    }

    pub fn block_height_pt(&self, block: &PdfBlock) -> f32 {
        block.lines.iter().map(|l| self.line_height_pt(l)).sum::<f32>() + self.block_gap_pt
    }
}

/// PDFの1行
#[derive(Debug, Clone, PartialEq)]
pub enum PdfLine {
    Heading(String),
    Text(String),
    /// アップロード画像の配置枠
    Photo { height_pt: f32 },
    Bar {
        label: String,
        fraction: f64,
        value: String,
        color: &'static str,
    },
    Row {
        cells: [String; 4],
        badge: Option<BadgeStyle>,
    },
    Bullet(String),
}

/// 改ページしないひとまとまり
#[derive(Debug, Clone, PartialEq)]
pub struct PdfBlock {
    pub lines: Vec<PdfLine>,
}

/// 表の列見出し
pub const TABLE_HEADERS: [&str; 4] = ["Category", "Est. Weight", "Recyclable?", "Identified Items"];

/// レポートをブロック列に変換
///
/// # Arguments
/// * `view` - レポート表示モデル
/// * `photo_height_pt` - アップロード画像を載せる場合の高さ
pub fn build_pdf_blocks(view: &ReportView, photo_height_pt: Option<f32>) -> Vec<PdfBlock> {
    let mut blocks = Vec::new();

    let mut overview = vec![PdfLine::Heading("Analysis Overview".into())];
    if let Some(height_pt) = photo_height_pt {
        overview.push(PdfLine::Photo { height_pt });
    }
    overview.push(PdfLine::Text(format!(
        "Identified {} categories of waste with a total estimated weight of {}.",
        view.category_count, view.total_weight_label
    )));
    blocks.push(PdfBlock { lines: overview });

    blocks.push(PdfBlock {
        lines: vec![
            PdfLine::Heading("Summary".into()),
            PdfLine::Text(format!("Est. Financial Loss: {}", view.estimated_loss_label)),
            PdfLine::Text(format!("Based on {}/g COGS", view.cogs_rate_label)),
            PdfLine::Text(format!("Total Waste Weight: {}", view.total_weight_label)),
            PdfLine::Text(format!("Biggest Loss Category: {}", view.biggest_loss_category)),
        ],
    });

    let mut composition = vec![PdfLine::Heading("Composition Analysis".into())];
    composition.extend(view.slices.iter().map(|slice| PdfLine::Bar {
        label: slice.category.clone(),
        fraction: slice.fraction,
        value: format!("{:.1}%", slice.fraction * 100.0),
        color: slice.color,
    }));
    blocks.push(PdfBlock { lines: composition });

    let mut distribution = vec![PdfLine::Heading("Weight Distribution".into())];
    distribution.extend(view.bars.iter().map(|bar| PdfLine::Bar {
        label: bar.category.clone(),
        fraction: bar.height,
        value: format!("{} g", bar.weight_grams),
        color: crate::report::CHART_COLORS[0],
    }));
    blocks.push(PdfBlock { lines: distribution });

    let mut table = vec![
        PdfLine::Heading("Detailed Waste Classification".into()),
        PdfLine::Row {
            cells: TABLE_HEADERS.map(String::from),
            badge: None,
        },
    ];
    table.extend(view.rows.iter().map(|row| PdfLine::Row {
        cells: [
            row.category.clone(),
            row.weight_label.clone(),
            row.status.clone(),
            row.notes.clone(),
        ],
        badge: Some(row.badge),
    }));
    blocks.push(PdfBlock { lines: table });

    let mut report = vec![
        PdfLine::Heading("Manager's Reduction Report".into()),
        PdfLine::Text(format!(
            "The highest impact area identified is {}. Addressing this can significantly reduce the estimated {} daily loss.",
            view.biggest_loss_category, view.estimated_loss_label
        )),
    ];
    report.extend(
        view.recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| PdfLine::Bullet(format!("{}. {}", i + 1, rec))),
    );
    blocks.push(PdfBlock { lines: report });

    blocks
}

/// "#10B981" → (r, g, b) 0.0-1.0
pub fn parse_hex_color(hex: &str) -> (f32, f32, f32) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return (0.0, 0.0, 0.0);
    }
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .map(|v| v as f32 / 255.0)
            .unwrap_or(0.0)
    };
    (channel(0), channel(2), channel(4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisResult, FinancialImpact, ManagerReport, WasteItem};

    fn view() -> ReportView {
        ReportView::build(&AnalysisResult {
            waste_breakdown: vec![
                WasteItem {
                    category: "Food Scraps".into(),
                    weight_grams: 500,
                    recyclable_status: "Compost".into(),
                    notes: "half-eaten fries".into(),
                },
                WasteItem {
                    category: "Plastic".into(),
                    weight_grams: 100,
                    recyclable_status: "Yes".into(),
                    notes: "cups".into(),
                },
            ],
            total_weight_grams: 600,
            financial_impact: FinancialImpact { cogs_rate: 0.5, estimated_loss: 250.0 },
            manager_report: ManagerReport {
                biggest_loss_category: "Food Scraps".into(),
                recommendations: vec!["a".into(), "b".into(), "c".into()],
            },
        })
    }

    #[test]
    fn test_layout_core_dimensions() {
        let core = PdfLayoutCore::from_layout(&ExportLayout::a4_portrait());
        assert!(core.page_width_pt > 590.0 && core.page_width_pt < 600.0);
        assert!(core.content_top_pt() > core.content_bottom_pt());
        assert!(core.bar_max_width_pt > 0.0);
    }

    #[test]
    fn test_blocks_cover_every_row_and_recommendation() {
        let blocks = build_pdf_blocks(&view(), None);
        let rows = blocks
            .iter()
            .flat_map(|b| &b.lines)
            .filter(|l| matches!(l, PdfLine::Row { badge: Some(_), .. }))
            .count();
        assert_eq!(rows, 2);

        let bullets = blocks
            .iter()
            .flat_map(|b| &b.lines)
            .filter(|l| matches!(l, PdfLine::Bullet(_)))
            .count();
        assert_eq!(bullets, 3);
    }

    #[test]
    fn test_summary_contains_currency() {
        let blocks = build_pdf_blocks(&view(), None);
        assert!(blocks[1].lines.contains(&PdfLine::Text("Est. Financial Loss: ₹250.00".into())));
    }

    #[test]
    fn test_photo_line_only_when_requested() {
        let without = build_pdf_blocks(&view(), None);
        assert!(!without[0].lines.iter().any(|l| matches!(l, PdfLine::Photo { .. })));
        let with = build_pdf_blocks(&view(), Some(200.0));
        assert!(with[0].lines.contains(&PdfLine::Photo { height_pt: 200.0 }));

        let core = PdfLayoutCore::from_layout(&ExportLayout::a4_portrait());
        assert!(core.block_height_pt(&with[0]) > core.block_height_pt(&without[0]));
    }

    #[test]
    fn test_parse_hex_color() {
        let (r, g, b) = parse_hex_color("#10B981");
        assert!((r - 16.0 / 255.0).abs() < 1e-6);
        assert!((g - 185.0 / 255.0).abs() < 1e-6);
        assert!((b - 129.0 / 255.0).abs() < 1e-6);
        assert_eq!(parse_hex_color("bad"), (0.0, 0.0, 0.0));
    }
}
