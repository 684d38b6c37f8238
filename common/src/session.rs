//! ログインセッション
//!
//! 認証が必要な呼び出しには必ずこの値を明示的に渡す。
//! 保存先（ブラウザのlocalStorage、CLIの設定ディレクトリ）は各クライアントが持つ。

use crate::api::LoginResponse;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub user_id: Option<String>,
    pub token: Option<String>,
    pub user: Option<Value>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user_id().is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// 認証必須の呼び出し前に確認する
    pub fn require_user_id(&self) -> Result<&str> {
        self.user_id().ok_or(Error::NotLoggedIn)
    }

    /// ログインレスポンスを反映
    ///
    /// user_id があればセッションを作り直す（前のユーザーの token / user は残さない）。
    /// user_id がなければ何も変えない。
    pub fn apply_login(&mut self, response: &LoginResponse) {
        if let Some(user_id) = &response.user_id {
            *self = Self {
                user_id: Some(user_id.clone()),
                token: response.token.clone(),
                user: response.user.clone(),
            };
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// 表示用の名前（user.name → user.email → user_id）
    pub fn display_name(&self) -> Option<String> {
        let from_user = self.user.as_ref().and_then(|user| {
            ["name", "email"]
                .iter()
                .find_map(|key| user.get(key).and_then(Value::as_str))
                .map(str::to_string)
        });
        from_user.or_else(|| self.user_id().map(str::to_string))
    }
}
