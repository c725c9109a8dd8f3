use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecowaste")]
#[command(about = "Restaurant food waste photo analysis and PDF report tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 廃棄物写真を1枚解析してレポートを表示
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 解析結果JSONの出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 解析後にPDFレポートも生成
        #[arg(long)]
        pdf: bool,

        /// PDFの出力ディレクトリ（デフォルト: カレント）
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// 使用するモデル（設定ファイルより優先）
        #[arg(short, long)]
        model: Option<String>,
    },

    /// 保存済みの解析結果JSONからPDFを生成
    Export {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// レポートに載せる元画像
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 既定のモデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_with_pdf() {
        let cli = Cli::parse_from(["ecowaste", "-v", "analyze", "bin.jpg", "--pdf", "--output-dir", "out"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze { image, pdf, output_dir, model, output } => {
                assert_eq!(image, PathBuf::from("bin.jpg"));
                assert!(pdf);
                assert_eq!(output_dir, Some(PathBuf::from("out")));
                assert!(model.is_none());
                assert!(output.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::parse_from(["ecowaste", "export", "result.json", "-i", "bin.png"]);
        match cli.command {
            Commands::Export { input, image, output } => {
                assert_eq!(input, PathBuf::from("result.json"));
                assert_eq!(image, Some(PathBuf::from("bin.png")));
                assert!(output.is_none());
            }
            _ => panic!("expected export"),
        }
    }
}
