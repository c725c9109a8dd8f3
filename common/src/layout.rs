//! レイアウト設定モジュール
//!
//! mm基準のページ定義（Source of Truth）。
//! Web版のスクリーンショットPDFとCLI版のベクターPDFで同じA4設定を使う。

// ============================================
// mm基準レイアウト
// ============================================

/// A4サイズ（mm）
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// 余白（mm、CLI版PDFのみ）
pub const MARGIN_MM: f32 = 12.0;

/// スクリーンショット倍率
pub const CAPTURE_SCALE: f32 = 2.0;

/// スクリーンショット背景色
pub const CAPTURE_BACKGROUND: &str = "#f0fdf4";

/// キャプチャ前の待ち時間（アニメーション収束待ち）
pub const SETTLE_DELAY_MS: u32 = 500;

// ============================================
// 変換係数
// ============================================

/// mm → pt変換 (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

/// pt → px変換 (96dpi基準)
pub const PT_TO_PX: f32 = 96.0 / 72.0;
pub const PX_TO_PT: f32 = 72.0 / 96.0;

/// エクスポート設定
#[derive(Debug, Clone, PartialEq)]
pub struct ExportLayout {
    /// ページ幅（mm）
    pub page_width_mm: f32,
    /// ページ高さ（mm）
    pub page_height_mm: f32,
    /// 余白（mm）
    pub margin_mm: f32,
    /// キャプチャ倍率
    pub scale: f32,
    /// 背景色
    pub background: &'static str,
    /// キャプチャ前の待ち時間（ms）
    pub settle_delay_ms: u32,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self::a4_portrait()
    }
}

impl ExportLayout {
    pub fn a4_portrait() -> Self {
        Self {
            page_width_mm: A4_WIDTH_MM,
            page_height_mm: A4_HEIGHT_MM,
            margin_mm: MARGIN_MM,
            scale: CAPTURE_SCALE,
            background: CAPTURE_BACKGROUND,
            settle_delay_ms: SETTLE_DELAY_MS,
        }
    }

    /// 利用可能幅（mm）
    pub fn usable_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_mm * 2.0
    }

    /// 利用可能高さ（mm）
    pub fn usable_height_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm * 2.0
    }
}

/// mm → pt 変換
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// pt → mm 変換
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

/// px → pt 変換
#[inline]
pub fn px_to_pt(px: f32) -> f32 {
    px * PX_TO_PT
}
