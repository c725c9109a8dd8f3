//! ターミナル向けレポート表示

use ecowaste_common::report::{BadgeStyle, ReportView};
use std::fmt::Write as _;

/// 棒グラフの最大幅（文字数）
const BAR_WIDTH: usize = 30;

fn badge_label(badge: BadgeStyle, status: &str) -> String {
    match badge {
        BadgeStyle::Recyclable => format!("[♻ {}]", status),
        BadgeStyle::Compost => format!("[🌱 {}]", status),
        BadgeStyle::Neutral => format!("[{}]", status),
    }
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

/// レポートをテキストで描画
pub fn render_text(view: &ReportView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Analysis Overview");
    let _ = writeln!(
        out,
        "  Identified {} categories of waste, total estimated weight {}",
        view.category_count, view.total_weight_label
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "  Est. Financial Loss   : {}", view.estimated_loss_label);
    let _ = writeln!(out, "                          (based on {}/g COGS)", view.cogs_rate_label);
    let _ = writeln!(out, "  Total Waste Weight    : {}", view.total_weight_label);
    let _ = writeln!(out, "  Biggest Loss Category : {}", view.biggest_loss_category);
    let _ = writeln!(out);

    let label_width = view
        .rows
        .iter()
        .map(|r| r.category.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let _ = writeln!(out, "Composition Analysis");
    for slice in &view.slices {
        let _ = writeln!(
            out,
            "  {:<width$} {} {:>5.1}%",
            slice.category,
            bar(slice.fraction),
            slice.fraction * 100.0,
            width = label_width
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Weight Distribution");
    for b in &view.bars {
        let _ = writeln!(
            out,
            "  {:<width$} {} {} g",
            b.category,
            bar(b.height),
            b.weight_grams,
            width = label_width
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Detailed Waste Classification");
    let _ = writeln!(
        out,
        "  {:<width$} | {:>10} | {:<14} | Identified Items",
        "Category",
        "Est. Weight",
        "Recyclable?",
        width = label_width
    );
    for row in &view.rows {
        let _ = writeln!(
            out,
            "  {:<width$} | {:>10} | {:<14} | {}",
            row.category,
            row.weight_label,
            badge_label(row.badge, &row.status),
            row.notes,
            width = label_width
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Manager's Reduction Report");
    let _ = writeln!(
        out,
        "  The highest impact area identified is {}. Addressing this can significantly reduce the estimated {} daily loss.",
        view.biggest_loss_category, view.estimated_loss_label
    );
    for (i, rec) in view.recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, rec);
    }

    out
}
