//! スクリーンショットのページ分割
//!
//! キャプチャ画像をページ幅に合わせて縮尺し、ページ高さを超える分は
//! 同じ画像を1ページ分ずつ上にずらして次ページへ配置する。

use serde::Serialize;

use crate::layout::ExportLayout;

/// 1ページ分の配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice {
    pub page_index: usize,
    /// 画像左上のY座標（mm、ページ上端基準。2ページ目以降は負値）
    pub offset_y_mm: f32,
    /// 描画幅（mm）
    pub width_mm: f32,
    /// 縮尺後の画像全体の高さ（mm）
    pub image_height_mm: f32,
}

/// キャプチャ画像を複数ページに分割
///
/// # Arguments
/// * `image_width_px` / `image_height_px` - キャプチャ画像のサイズ
/// * `layout` - ページ設定
///
/// # Returns
/// 少なくとも1ページ。残り高さが0より大きい間ページを足す
pub fn paginate(image_width_px: u32, image_height_px: u32, layout: &ExportLayout) -> Vec<PageSlice> {
    let width_mm = layout.page_width_mm;
    let page_height = layout.page_height_mm;
    let image_height_mm = if image_width_px == 0 {
        0.0
    } else {
        image_height_px as f32 * width_mm / image_width_px as f32
    };

    let slice = |page_index: usize| PageSlice {
        page_index,
        offset_y_mm: -(page_index as f32) * page_height,
        width_mm,
        image_height_mm,
    };

    let mut pages = vec![slice(0)];
    let mut height_left = image_height_mm - page_height;
    while height_left > 0.0 {
        pages.push(slice(pages.len()));
        height_left -= page_height;
    }
    pages
}

/// ダウンロードファイル名: EcoWaste_Analysis_14-10-2026.pdf
///
/// en-IN の日付表記（日/月/年、ゼロ埋めなし）のスラッシュをダッシュに置換した形。
pub fn export_file_name(day: u32, month: u32, year: i32) -> String {
    format!("EcoWaste_Analysis_{}-{}-{}.pdf", day, month, year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_when_short() {
        let layout = ExportLayout::a4_portrait();
        // 幅2000px → 210mm、高さ1000px → 105mm
        let pages = paginate(2000, 1000, &layout);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].offset_y_mm, 0.0);
        assert!((pages[0].image_height_mm - 105.0).abs() < 0.01);
    }

    #[test]
    fn test_exact_page_height_is_one_page() {
        let layout = ExportLayout::a4_portrait();
        let pages = paginate(2100, 2970, &layout);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_tall_capture_spans_pages_shifted_by_page_height() {
        let layout = ExportLayout::a4_portrait();
        // 高さ 2.5ページ分 → 3ページ
        let pages = paginate(2100, 7425, &layout);
        assert_eq!(pages.len(), 3);
        for (i, page) in pages.iter().enumerate() {
            assert_eq!(page.page_index, i);
            assert!((page.offset_y_mm + i as f32 * 297.0).abs() < 0.01);
            assert!((page.image_height_mm - 742.5).abs() < 0.01);
            assert!((page.width_mm - 210.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_zero_width_does_not_divide() {
        let pages = paginate(0, 500, &ExportLayout::a4_portrait());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].image_height_mm, 0.0);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(14, 10, 2026), "EcoWaste_Analysis_14-10-2026.pdf");
        assert_eq!(export_file_name(5, 1, 2026), "EcoWaste_Analysis_5-1-2026.pdf");
    }

    #[test]
    fn test_page_slice_serialize() {
        let json = serde_json::to_string(&paginate(100, 100, &ExportLayout::a4_portrait())).unwrap();
        assert!(json.contains("\"offsetYMm\":"));
        assert!(json.contains("\"pageIndex\":0"));
    }
}
