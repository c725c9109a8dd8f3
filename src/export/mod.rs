pub mod pdf;

use crate::error::Result;
use ecowaste_common::export::export_file_name;
use ecowaste_common::{AnalysisResult, EncodedImage};
use std::path::{Path, PathBuf};

/// 今日の日付でファイル名を決める
pub fn default_file_name() -> String {
    use chrono::Datelike;
    let today = chrono::Local::now().date_naive();
    export_file_name(today.day(), today.month(), today.year())
}

/// 出力先がディレクトリ（または拡張子なし）ならファイル名を補う
pub fn output_path(output: &Path) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_file_name())
    } else {
        output.to_path_buf()
    }
}

/// レポートPDFを書き出してパスを返す
pub fn export_report(
    result: &AnalysisResult,
    image: Option<&EncodedImage>,
    output: &Path,
) -> Result<PathBuf> {
    let path = output_path(output);
    println!("- Generating PDF...");
    pdf::generate_pdf(result, image, &path)?;
    println!("✔ PDF written: {}", path.display());
    Ok(path)
}
