use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hashtag-diag")]
#[command(about = "공고 제목 해시태그 분류 실패 진단기", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// ログの詳細度 (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ハッシュタグ未付与の公告タイトルを辞書で再分類して診断
    Diagnose {
        /// 公告HTMLファイル（またはHTMLを含むフォルダ）
        #[arg(required = true)]
        html: PathBuf,

        /// ハッシュタグ辞書 (xlsx/csv)
        #[arg(short, long, conflicts_with = "use_default")]
        dictionary: Option<PathBuf>,

        /// 設定の既定辞書（2025年分類基準）を使用
        #[arg(long)]
        use_default: bool,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (csv/excel/both/json)。省略時は設定値
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// 分布ランキングを表示しない
        #[arg(long)]
        no_ranking: bool,
    },

    /// 診断対象になるタイトルを一覧表示
    Extract {
        /// 公告HTMLファイル（またはHTMLを含むフォルダ）
        #[arg(required = true)]
        html: PathBuf,
    },

    /// 辞書を読み込んで内容を表示
    Dictionary {
        /// ハッシュタグ辞書 (xlsx/csv)
        #[arg(required = true)]
        path: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 既定辞書ファイルを設定
        #[arg(long)]
        set_default_dictionary: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Excel,
    Both,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            "both" => Ok(OutputFormat::Both),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, excel, both, or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Excel => write!(f, "excel"),
            OutputFormat::Both => write!(f, "both"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
