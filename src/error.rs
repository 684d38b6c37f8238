use count_vision_common::Notice;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountVisionError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像が指定されていません")]
    NoImages,

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] count_vision_common::Error),
}

impl CountVisionError {
    /// ユーザー向け通知に変換（`fallback` はサーバーメッセージがない場合の文言）
    pub fn notice(&self, fallback: &str) -> Notice {
        match self {
            CountVisionError::Common(e) => Notice::from_error(e, fallback),
            CountVisionError::NoImages | CountVisionError::FileNotFound(_) => {
                Notice::warning(self.to_string())
            }
            CountVisionError::Config(_) => Notice::error(self.to_string()),
            _ => Notice::error(fallback),
        }
    }
}

pub type Result<T> = std::result::Result<T, CountVisionError>;
