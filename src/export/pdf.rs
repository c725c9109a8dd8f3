//! レポートPDF生成（printpdf）
//!
//! 共通のブロック列を上から順に置き、ブロックが残り高さに収まらなければ改ページする。
//! 組み込みフォント（WinAnsi）で描くため、表示できない文字は置き換える。

use crate::error::{EcoWasteError, Result};
use ecowaste_common::export::pdf_core::parse_hex_color;
use ecowaste_common::export::{build_pdf_blocks, PdfBlock, PdfLayoutCore, PdfLine};
use ecowaste_common::report::{BadgeStyle, ReportView};
use ecowaste_common::{AnalysisResult, EncodedImage, ExportLayout};
use printpdf::*;
use std::path::Path;

/// 埋め込み画像の最大幅（px）
const PHOTO_MAX_WIDTH_PX: u32 = 1000;
const PHOTO_JPEG_QUALITY: u8 = 80;
/// 埋め込み画像の表示高さ（pt）
const PHOTO_HEIGHT_PT: f32 = 200.0;
/// 本文の折り返し文字数
const WRAP_CHARS: usize = 95;
/// 表の列幅（pt、左から）
const COLUMN_WIDTHS_PT: [f32; 4] = [130.0, 70.0, 80.0, 250.0];

/// PDF埋め込み用のJPEG
struct PdfPhoto {
    jpeg: Vec<u8>,
    width: u32,
    height: u32,
}

impl PdfPhoto {
    /// 縮小してJPEGに再エンコード
    fn from_encoded(image: &EncodedImage) -> Result<Self> {
        let bytes = image.decode()?;
        let img = ::image::load_from_memory(&bytes)
            .map_err(|e| EcoWasteError::ImageLoad(e.to_string()))?;

        let img = if img.width() > PHOTO_MAX_WIDTH_PX {
            img.resize(
                PHOTO_MAX_WIDTH_PX,
                u32::MAX,
                ::image::imageops::FilterType::Triangle,
            )
        } else {
            img
        };
        let rgb = img.to_rgb8();

        let mut jpeg = Vec::new();
        let encoder = ::image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, PHOTO_JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| EcoWasteError::ImageLoad(e.to_string()))?;

        Ok(Self { jpeg, width: rgb.width(), height: rgb.height() })
    }
}

/// 描画中のページ
struct PageWriter<'a> {
    core: &'a PdfLayoutCore,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
    cursor_pt: f32,
}

impl<'a> PageWriter<'a> {
    fn new(core: &'a PdfLayoutCore) -> Self {
        Self {
            core,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor_pt: core.content_top_pt(),
        }
    }

    fn remaining_pt(&self) -> f32 {
        self.cursor_pt - self.core.content_bottom_pt()
    }

    fn at_page_top(&self) -> bool {
        (self.cursor_pt - self.core.content_top_pt()).abs() < f32::EPSILON
    }

    fn new_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(PdfPage::new(
            Mm(pt_to_mm_f(self.core.page_width_pt)),
            Mm(pt_to_mm_f(self.core.page_height_pt)),
            ops,
        ));
        self.cursor_pt = self.core.content_top_pt();
    }

    fn finish(mut self) -> Vec<PdfPage> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        self.pages
    }

    fn text(&mut self, text: &str, x_pt: f32, y_pt: f32, size: f32, font: BuiltinFont, color: (f32, f32, f32)) {
        self.ops.extend([
            Op::StartTextSection,
            Op::SetFillColor { col: rgb(color) },
            Op::SetTextCursor { pos: Point { x: Pt(x_pt), y: Pt(y_pt) } },
            Op::SetFontSizeBuiltinFont { size: Pt(size), font },
            Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(pdf_safe(text))],
                font,
            },
            Op::EndTextSection,
        ]);
    }

    fn rect(&mut self, x_pt: f32, y_pt: f32, width_pt: f32, height_pt: f32, color: (f32, f32, f32)) {
        if width_pt <= 0.0 || height_pt <= 0.0 {
            return;
        }
        let corner = |x: f32, y: f32| LinePoint { p: Point { x: Pt(x), y: Pt(y) }, bezier: false };
        self.ops.extend([
            Op::SetFillColor { col: rgb(color) },
            Op::DrawPolygon {
                polygon: Polygon {
                    rings: vec![PolygonRing {
                        points: vec![
                            corner(x_pt, y_pt),
                            corner(x_pt + width_pt, y_pt),
                            corner(x_pt + width_pt, y_pt + height_pt),
                            corner(x_pt, y_pt + height_pt),
                        ],
                    }],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                },
            },
        ]);
    }

    fn line(&mut self, line: &PdfLine, photo: Option<&XObjectId>, photo_size: (u32, u32)) {
        let core = self.core;
        let height = core.line_height_pt(line);
        if height > self.remaining_pt() && !self.at_page_top() {
            self.new_page();
        }

        let x = core.margin_pt;
        let baseline = self.cursor_pt - height + core.line_gap_pt;
        let body = core.body_size_pt;

        match line {
            PdfLine::Heading(text) => {
                self.text(text, x, baseline + core.line_gap_pt, core.heading_size_pt, BuiltinFont::HelveticaBold, TITLE_COLOR);
            }
            PdfLine::Text(text) => self.text(text, x, baseline, body, BuiltinFont::Helvetica, BODY_COLOR),
            PdfLine::Bullet(text) => self.text(text, x + 10.0, baseline, body, BuiltinFont::Helvetica, BODY_COLOR),
            PdfLine::Photo { height_pt } => {
                if let Some(id) = photo {
                    let (w_px, h_px) = photo_size;
                    let scale = height_pt / h_px.max(1) as f32;
                    let max_scale = (core.page_width_pt - core.margin_pt * 2.0) / w_px.max(1) as f32;
                    let scale = scale.min(max_scale);
                    self.ops.push(Op::UseXobject {
                        id: id.clone(),
                        transform: XObjectTransform {
                            translate_x: Some(Pt(x)),
                            translate_y: Some(Pt(self.cursor_pt - h_px as f32 * scale)),
                            rotate: None,
                            scale_x: Some(scale),
                            scale_y: Some(scale),
                            dpi: Some(72.0),
                        },
                    });
                }
            }
            PdfLine::Bar { label, fraction, value, color } => {
                self.text(&truncate(label, 28), x, baseline, body, BuiltinFont::Helvetica, BODY_COLOR);
                let bar_x = x + core.label_width_pt;
                let bar_width = core.bar_max_width_pt * fraction.clamp(0.0, 1.0) as f32;
                self.rect(bar_x, baseline - 1.0, bar_width, body, parse_hex_color(color));
                self.text(value, bar_x + bar_width + 6.0, baseline, body, BuiltinFont::Helvetica, BODY_COLOR);
            }
            PdfLine::Row { cells, badge } => {
                let font = if badge.is_none() { BuiltinFont::HelveticaBold } else { BuiltinFont::Helvetica };
                let mut cell_x = x;
                for (i, cell) in cells.iter().enumerate() {
                    let color = match (i, badge) {
                        (2, Some(style)) => badge_color(*style),
                        _ => BODY_COLOR,
                    };
                    let max_chars = (COLUMN_WIDTHS_PT[i] / (body * 0.5)) as usize;
                    self.text(&truncate(cell, max_chars), cell_x, baseline, body, font, color);
                    cell_x += COLUMN_WIDTHS_PT[i];
                }
            }
        }

        self.cursor_pt -= height;
    }

    fn block(&mut self, block: &PdfBlock, photo: Option<&XObjectId>, photo_size: (u32, u32)) {
        let height = self.core.block_height_pt(block);
        if height > self.remaining_pt() && !self.at_page_top() {
            self.new_page();
        }
        for line in &block.lines {
            self.line(line, photo, photo_size);
        }
        self.cursor_pt -= self.core.block_gap_pt;
    }
}

const TITLE_COLOR: (f32, f32, f32) = (0.07, 0.09, 0.15);
const BODY_COLOR: (f32, f32, f32) = (0.22, 0.25, 0.32);

fn badge_color(style: BadgeStyle) -> (f32, f32, f32) {
    match style {
        BadgeStyle::Recyclable => parse_hex_color("#1E40AF"),
        BadgeStyle::Compost => parse_hex_color("#166534"),
        BadgeStyle::Neutral => parse_hex_color("#1F2937"),
    }
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn pt_to_mm_f(pt: f32) -> f32 {
    ecowaste_common::layout::pt_to_mm(pt)
}

/// WinAnsiで描けない文字を置き換える
fn pdf_safe(text: &str) -> String {
    text.replace('₹', "Rs. ")
        .chars()
        .map(|c| if (c as u32) < 0x100 { c } else { '?' })
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// 単語単位で折り返す
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// 長い本文行を複数行に展開
fn wrap_blocks(blocks: Vec<PdfBlock>) -> Vec<PdfBlock> {
    blocks
        .into_iter()
        .map(|block| PdfBlock {
            lines: block
                .lines
                .into_iter()
                .flat_map(|line| match line {
                    PdfLine::Text(text) => wrap(&text, WRAP_CHARS).into_iter().map(PdfLine::Text).collect(),
                    PdfLine::Bullet(text) => wrap(&text, WRAP_CHARS - 4).into_iter().map(PdfLine::Bullet).collect(),
                    other => vec![other],
                })
                .collect(),
        })
        .collect()
}

/// レポートPDFのバイト列を生成
pub fn render_pdf(result: &AnalysisResult, image: Option<&EncodedImage>) -> Result<Vec<u8>> {
    let view = ReportView::build(result);
    let core = PdfLayoutCore::from_layout(&ExportLayout::a4_portrait());
    let mut doc = PdfDocument::new("EcoWaste Analysis");
    let mut warnings = Vec::new();

    let photo = match image {
        Some(encoded) => match PdfPhoto::from_encoded(encoded) {
            Ok(photo) => Some(photo),
            Err(e) => {
                // 画像なしでレポートは出す
                tracing::warn!("skipping uploaded image in PDF: {}", e);
                None
            }
        },
        None => None,
    };

    let (photo_id, photo_size) = match &photo {
        Some(p) => {
            let raw = RawImage::decode_from_bytes(&p.jpeg, &mut warnings)
                .map_err(|e| EcoWasteError::PdfGeneration(format!("image decode: {}", e)))?;
            (Some(doc.add_image(&raw)), (p.width, p.height))
        }
        None => (None, (0, 0)),
    };

    let photo_height = photo_id.as_ref().map(|_| PHOTO_HEIGHT_PT);
    let blocks = wrap_blocks(build_pdf_blocks(&view, photo_height));

    let mut writer = PageWriter::new(&core);
    writer.text("EcoWaste AI - Waste Analysis Report", core.margin_pt, core.content_top_pt() - 18.0, 18.0, BuiltinFont::HelveticaBold, TITLE_COLOR);
    writer.cursor_pt -= 34.0;
    for block in &blocks {
        writer.block(block, photo_id.as_ref(), photo_size);
    }
    let pages = writer.finish();

    tracing::debug!(pages = pages.len(), "PDF layout finished");

    let bytes = doc.with_pages(pages).save(&PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        tracing::debug!("printpdf: {:?}", warning);
    }
    Ok(bytes)
}

pub fn generate_pdf(result: &AnalysisResult, image: Option<&EncodedImage>, output_path: &Path) -> Result<()> {
    let bytes = render_pdf(result, image)?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_safe_replaces_rupee() {
        assert_eq!(pdf_safe("₹250.00"), "Rs. 250.00");
        assert_eq!(pdf_safe("café 🍟"), "café ?");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long category name", 10), "a very ...");
    }

    #[test]
    fn test_wrap() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, ["one two", "three", "four five"]);
        assert_eq!(wrap("", 10), [""]);
    }
}
