//! ユーザー向け通知

use crate::api::{LoginResponse, MSG_LOGIN_WITHOUT_USER_ID};
use crate::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    /// ログイン結果の通知（user_id のない応答は成功扱いにしない）
    pub fn for_login(response: &LoginResponse) -> Self {
        if response.user_id.is_some() {
            Self::success("Login successful!")
        } else {
            Self::warning(MSG_LOGIN_WITHOUT_USER_ID)
        }
    }

    /// エラーを通知に変換
    ///
    /// ローカル検証エラーは警告としてそのまま表示し、
    /// API失敗はサーバーのメッセージ、なければ `fallback` を使う。
    pub fn from_error(error: &Error, fallback: &str) -> Self {
        match error {
            Error::Validation(_) | Error::NotLoggedIn => Self::warning(error.to_string()),
            Error::Api { message: Some(message), .. } => Self::error(message.clone()),
            _ => Self::error(fallback),
        }
    }
}
