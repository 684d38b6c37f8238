use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "count-vision")]
#[command(about = "画像ベース物体カウントサービスのクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// アカウントを作成
    Register {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// 確認用パスワード（省略時は --password と同じ）
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// ログインしてセッションを保存
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// 保存したセッションを削除
    Logout,

    /// 画像1枚をアップロードしてカウント
    Count {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 品目（`count-vision item-types` で一覧）
        #[arg(short = 't', long)]
        item_type: String,
    },

    /// 複数画像を一括アップロード
    Batch {
        /// 画像ファイル
        #[arg(required = true, num_args = 1..)]
        images: Vec<PathBuf>,

        #[arg(short = 't', long)]
        item_type: String,
    },

    /// 過去の結果を表示（1ページ1件）
    History {
        /// 表示するページ
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// 全ページを表示
        #[arg(long)]
        all: bool,

        /// 正規化済み結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 件数を修正
    Correct {
        result_id: String,

        /// 正しい件数
        count: String,
    },

    /// 品目の候補を表示
    ItemTypes,

    /// 設定の表示・変更
    Config {
        /// APIのベースURL
        #[arg(long)]
        set_api_url: Option<String>,

        /// 画像配信のベースURL
        #[arg(long)]
        set_static_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Commands {
    /// サーバーからメッセージがない場合のエラー文言
    pub fn failure_message(&self) -> &'static str {
        match self {
            Commands::Register { .. } => "Registration failed",
            Commands::Login { .. } => "Login failed",
            Commands::Count { .. } | Commands::Batch { .. } => "Upload failed",
            Commands::History { .. } => "Failed to fetch results",
            Commands::Correct { .. } => "Correction failed",
            Commands::Logout | Commands::ItemTypes | Commands::Config { .. } => "Command failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        let cli = Cli::try_parse_from(["count-vision", "count", "a.jpg", "-t", "car"]).expect("パース失敗");
        match cli.command {
            Commands::Count { image, item_type } => {
                assert_eq!(image, PathBuf::from("a.jpg"));
                assert_eq!(item_type, "car");
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_batch_requires_images() {
        assert!(Cli::try_parse_from(["count-vision", "batch", "-t", "car"]).is_err());
        let cli = Cli::try_parse_from(["count-vision", "batch", "a.jpg", "b.png", "-t", "car"])
            .expect("パース失敗");
        match cli.command {
            Commands::Batch { images, .. } => assert_eq!(images.len(), 2),
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_parse_history_defaults() {
        let cli = Cli::try_parse_from(["count-vision", "-v", "history"]).expect("パース失敗");
        assert!(cli.verbose);
        match cli.command {
            Commands::History { page, all, json } => {
                assert_eq!(page, 1);
                assert!(!all);
                assert!(!json);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_failure_messages() {
        let cli = Cli::try_parse_from(["count-vision", "correct", "r1", "5"]).expect("パース失敗");
        assert_eq!(cli.command.failure_message(), "Correction failed");
    }
}
