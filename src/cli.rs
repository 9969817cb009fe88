use clap::{Parser, Subcommand};
use crate::ocr_provider::OcrProvider;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "card-buyback")]
#[command(about = "トレカ買取査定ツール（テキスト・OCR照合）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 照合を受け入れる最低スコア（設定ファイルより優先）
    #[arg(long, global = true, value_parser = clap::value_parser!(i32).range(0..))]
    pub min_score: Option<i32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキストファイル（1行1枚）を照合・査定
    Lines {
        /// 入力テキストファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ（省略時は画面表示のみ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/excel/both)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// ドキュメントタイトル
        #[arg(short, long, default_value = "買取査定")]
        title: String,
    },

    /// OCRレスポンスのフォルダを照合・査定
    Ocr {
        /// OCRレスポンスのフォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// OCRレスポンスの形式
        #[arg(short, long, default_value = "vision")]
        provider: OcrProvider,

        /// 出力ファイル/ディレクトリ（省略時は画面表示のみ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/excel/both)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// ドキュメントタイトル
        #[arg(short, long, default_value = "買取査定")]
        title: String,
    },

    /// カタログの内容を表示
    Catalog {
        /// カタログファイル（省略時は設定値または組み込みカタログ）
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// カタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 最低スコアを設定
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
        set_min_score: Option<i32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Excel,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use json, excel, or both", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("xlsx".parse::<ExportFormat>(), Ok(ExportFormat::Excel));
        assert_eq!("both".parse::<ExportFormat>(), Ok(ExportFormat::Both));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_parse_ocr_command() {
        let cli = Cli::try_parse_from([
            "card-buyback", "ocr", "scans", "--provider", "text", "--min-score", "3",
        ])
        .unwrap();

        assert_eq!(cli.min_score, Some(3));
        match cli.command {
            Commands::Ocr { folder, provider, format, .. } => {
                assert_eq!(folder, PathBuf::from("scans"));
                assert_eq!(provider, OcrProvider::Text);
                assert_eq!(format, ExportFormat::Json);
            }
            _ => panic!("Expected Ocr command"),
        }
    }

    #[test]
    fn test_negative_min_score_is_rejected() {
        assert!(Cli::try_parse_from(["card-buyback", "lines", "in.txt", "--min-score=-1"]).is_err());
        assert!(Cli::try_parse_from(["card-buyback", "config", "--set-min-score=-3"]).is_err());

        let cli = Cli::try_parse_from(["card-buyback", "lines", "in.txt", "--min-score=0"]).unwrap();
        assert_eq!(cli.min_score, Some(0));
    }
}
