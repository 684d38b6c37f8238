//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 入力値の検証エラー（ネットワーク呼び出し前に弾く）
    #[error("{0}")]
    Validation(String),

    #[error("User is not logged in")]
    NotLoggedIn,

    /// サーバーがエラーステータスを返した
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api { status: u16, message: Option<String> },

    /// 通信そのものの失敗
    #[error("Transport error: {0}")]
    Transport(String),
}

impl Error {
    /// ローカルで検出したエラーか（警告扱い）
    pub fn is_local(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotLoggedIn)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let error = Error::Validation("Please enter a correct count".to_string());
        assert_eq!(format!("{}", error), "Please enter a correct count");
    }

    #[test]
    fn test_error_display_not_logged_in() {
        assert_eq!(format!("{}", Error::NotLoggedIn), "User is not logged in");
    }

    #[test]
    fn test_error_display_api() {
        let error = Error::Api { status: 400, message: Some("Missing result_id".into()) };
        let display = format!("{}", error);
        assert!(display.contains("400"));
        assert!(display.contains("Missing result_id"));

        let error = Error::Api { status: 500, message: None };
        assert!(format!("{}", error).contains("no message"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_is_local() {
        assert!(Error::NotLoggedIn.is_local());
        assert!(Error::Validation("x".into()).is_local());
        assert!(!Error::Transport("refused".into()).is_local());
        assert!(!Error::Api { status: 500, message: None }.is_local());
    }
}
