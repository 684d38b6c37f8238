//! リモートAPIの契約
//!
//! エンドポイント、リクエスト/レスポンス型、レスポンス本体の解釈。
//! 通信自体は各クライアント（CLI: reqwest、Web: fetch）が行う。

use crate::error::{Error, Result};
use crate::types::DetectionResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// APIのデフォルトベースアドレス
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// アップロードフォームの品目候補
pub const ITEM_TYPES: &[&str] = &[
    "car", "cat", "tree", "dog", "building", "person", "sky", "ground", "hardware",
];

/// バックエンドが受け付ける画像拡張子
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

pub const MSG_UPLOAD_INCOMPLETE: &str = "Please select an image and item type";
pub const MSG_UNSUPPORTED_IMAGE: &str = "Unsupported image type";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_REGISTER_INCOMPLETE: &str = "Please fill in all fields";
pub const MSG_LOGIN_INCOMPLETE: &str = "Please enter your email and password";
pub const MSG_LOGIN_WITHOUT_USER_ID: &str = "Login response did not include a user id";

/// HTTPメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// APIエンドポイント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
    Count,
    BatchCount,
    PreviousResults { user_id: String },
    Correct,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::PreviousResults { .. } => Method::Get,
            _ => Method::Post,
        }
    }

    /// ベースアドレスからの相対パス（先頭スラッシュ付き）
    pub fn path(&self) -> String {
        match self {
            Endpoint::Register => "/Auth/register".into(),
            Endpoint::Login => "/Auth/login".into(),
            Endpoint::Count => "/Counting/count".into(),
            Endpoint::BatchCount => "/Counting/batch_count".into(),
            Endpoint::PreviousResults { user_id } => {
                format!("/Auth/previous-results?user_id={}", urlencoding::encode(user_id))
            }
            Endpoint::Correct => "/Correction/correct".into(),
        }
    }

    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim().trim_end_matches('/'), self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Result<Self> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(Error::Validation(MSG_LOGIN_INCOMPLETE.into()));
        }
        Ok(Self { email: email.to_string(), password: password.to_string() })
    }
}

/// ログインレスポンス（使用するフィールドのみ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub token: Option<String>,
    pub user: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    pub result_id: String,
    pub correct_count: i64,
}

/// 登録フォーム（確認用パスワード付き）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(Error::Validation(MSG_REGISTER_INCOMPLETE.into()));
        }
        if self.password != self.confirm_password {
            return Err(Error::Validation(MSG_PASSWORD_MISMATCH.into()));
        }
        Ok(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// アップロード前の検証
///
/// # Arguments
/// * `file_names` - 選択された画像ファイル名
/// * `item_type` - 品目
///
/// # Returns
/// トリム済みの品目
pub fn validate_upload(file_names: &[&str], item_type: &str) -> Result<String> {
    let item_type = item_type.trim();
    if file_names.is_empty() || item_type.is_empty() {
        return Err(Error::Validation(MSG_UPLOAD_INCOMPLETE.into()));
    }
    if let Some(bad) = file_names.iter().find(|name| !is_supported_image(name)) {
        return Err(Error::Validation(format!("{}: {}", MSG_UNSUPPORTED_IMAGE, bad)));
    }
    Ok(item_type.to_string())
}

/// 対応画像形式か（拡張子で判定、大文字小文字無視）
pub fn is_supported_image(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// 結果一覧レスポンスを解釈
///
/// 配列、または `results` 配列を持つオブジェクト。それ以外は空。
pub fn results_from_value(value: Value) -> Vec<DetectionResult> {
    match value {
        Value::Array(items) => parse_items(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => parse_items(items),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// 一括アップロードのレスポンスを解釈（単一結果オブジェクトも許容）
pub fn batch_results_from_value(value: Value) -> Vec<DetectionResult> {
    let is_single = value
        .as_object()
        .is_some_and(|map| !map.contains_key("results"));
    if is_single {
        serde_json::from_value(value).map(|r| vec![r]).unwrap_or_default()
    } else {
        results_from_value(value)
    }
}

/// ログインレスポンスを解釈（オブジェクトでない本体はエラー）
pub fn login_response_from_value(value: Value) -> Result<LoginResponse> {
    Ok(serde_json::from_value(value)?)
}

/// 単一アップロードのレスポンスを解釈
pub fn result_from_value(value: Value) -> Result<DetectionResult> {
    if !value.is_object() {
        return Err(Error::Api { status: 200, message: Some("Unexpected response".into()) });
    }
    Ok(serde_json::from_value(value)?)
}

fn parse_items(items: Vec<Value>) -> Vec<DetectionResult> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}

/// エラーレスポンス本体からサーバーのメッセージを取り出す
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// 成功レスポンスの本体をJSON化（空は null、JSONでなければ文字列）
pub fn body_value(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// HTTPステータスと本体からAPIエラーを作る
pub fn api_error(status: u16, body: &str) -> Error {
    Error::Api { status, message: server_message(body) }
}

/// 空でない文字列か数値を文字列として受け取り、それ以外の型は None
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Register.path(), "/Auth/register");
        assert_eq!(Endpoint::Login.path(), "/Auth/login");
        assert_eq!(Endpoint::Count.path(), "/Counting/count");
        assert_eq!(Endpoint::BatchCount.path(), "/Counting/batch_count");
        assert_eq!(Endpoint::Correct.path(), "/Correction/correct");
        assert_eq!(
            Endpoint::PreviousResults { user_id: "u1".into() }.path(),
            "/Auth/previous-results?user_id=u1"
        );
    }

    #[test]
    fn test_previous_results_encodes_user_id() {
        let endpoint = Endpoint::PreviousResults { user_id: "a b&c".into() };
        assert_eq!(endpoint.path(), "/Auth/previous-results?user_id=a%20b%26c");
        assert_eq!(endpoint.method(), Method::Get);
    }

    #[test]
    fn test_endpoint_url_joins_base() {
        assert_eq!(
            Endpoint::Login.url("http://localhost:5000/"),
            "http://localhost:5000/Auth/login"
        );
        assert_eq!(Endpoint::Login.method().as_str(), "POST");
    }

    #[test]
    fn test_correction_request_shape() {
        let body = serde_json::to_value(CorrectionRequest {
            result_id: "r1".into(),
            correct_count: 5,
        })
        .expect("シリアライズ失敗");
        assert_eq!(body, json!({"result_id": "r1", "correct_count": 5}));
    }

    #[test]
    fn test_login_response_variants() {
        let r: LoginResponse = serde_json::from_value(json!({"user_id": "u1"})).expect("失敗");
        assert_eq!(r.user_id.as_deref(), Some("u1"));
        assert!(r.token.is_none());

        let r: LoginResponse =
            serde_json::from_value(json!({"user_id": 17, "token": "t", "user": {"name": "A"}}))
                .expect("失敗");
        assert_eq!(r.user_id.as_deref(), Some("17"));
        assert_eq!(r.token.as_deref(), Some("t"));
        assert!(r.user.is_some());

        // 想定外の型の token は無視し、user_id は残す
        let r: LoginResponse =
            serde_json::from_value(json!({"user_id": "u1", "token": {"access": "x"}})).expect("失敗");
        assert_eq!(r.user_id.as_deref(), Some("u1"));
        assert!(r.token.is_none());

        let r: LoginResponse = serde_json::from_value(json!({"message": "ok"})).expect("失敗");
        assert!(r.user_id.is_none());
    }

    #[test]
    fn test_login_response_from_value() {
        let r = login_response_from_value(json!({"user_id": "u1", "token": ["x"]})).expect("失敗");
        assert_eq!(r.user_id.as_deref(), Some("u1"));

        assert!(matches!(login_response_from_value(Value::Null), Err(Error::Json(_))));
        assert!(matches!(login_response_from_value(json!("ok")), Err(Error::Json(_))));
    }

    #[test]
    fn test_login_request_requires_fields() {
        assert!(LoginRequest::new("a@b.c", "pw").is_ok());
        assert!(matches!(LoginRequest::new(" ", "pw"), Err(Error::Validation(_))));
        assert!(matches!(LoginRequest::new("a@b.c", ""), Err(Error::Validation(_))));
    }

    #[test]
    fn test_register_form_validation() {
        let mut form = RegisterForm {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "secret".into(),
            confirm_password: "other".into(),
        };
        match form.validate() {
            Err(Error::Validation(m)) => assert_eq!(m, MSG_PASSWORD_MISMATCH),
            other => panic!("unexpected: {:?}", other),
        }

        form.confirm_password = "secret".into();
        let request = form.validate().expect("検証失敗");
        assert_eq!(request.email, "ann@example.com");

        form.name = "  ".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_validate_upload() {
        assert_eq!(validate_upload(&["a.JPG"], " car ").expect("検証失敗"), "car");
        assert!(matches!(validate_upload(&[], "car"), Err(Error::Validation(_))));
        assert!(matches!(validate_upload(&["a.jpg"], ""), Err(Error::Validation(_))));
        match validate_upload(&["a.jpg", "notes.txt"], "car") {
            Err(Error::Validation(m)) => assert!(m.contains("notes.txt")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image("photo.jpeg"));
        assert!(is_supported_image("scan.BMP"));
        assert!(!is_supported_image("photo"));
        assert!(!is_supported_image("photo.webp"));
    }

    #[test]
    fn test_results_from_value() {
        let list = results_from_value(json!([{"_id": "a"}, {"_id": "b"}]));
        assert_eq!(list.len(), 2);

        let list = results_from_value(json!({"results": [{"_id": "a"}, 3, "x"]}));
        assert_eq!(list.len(), 1);

        assert!(results_from_value(json!({"results": "nope"})).is_empty());
        assert!(results_from_value(json!("nope")).is_empty());
        assert!(results_from_value(Value::Null).is_empty());
    }

    #[test]
    fn test_batch_results_accept_single_object() {
        let list = batch_results_from_value(json!({"result_id": "r1", "count": 3}));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id(), Some("r1"));

        let list = batch_results_from_value(json!({"results": [{"result_id": "r1"}, {"result_id": "r2"}]}));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_result_from_value() {
        let result = result_from_value(json!({"result_id": "r1", "count": 2})).expect("失敗");
        assert_eq!(result.predicted_count(), Some(2));
        assert!(result_from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_server_message() {
        assert_eq!(server_message(r#"{"error": "Invalid file type"}"#).as_deref(), Some("Invalid file type"));
        assert_eq!(server_message(r#"{"message": "Bad credentials"}"#).as_deref(), Some("Bad credentials"));
        assert_eq!(server_message(r#"{"error": ""}"#), None);
        assert_eq!(server_message("<html>500</html>"), None);
    }

    #[test]
    fn test_body_value() {
        assert_eq!(body_value(String::new()), Value::Null);
        assert_eq!(body_value("  \n".into()), Value::Null);
        assert_eq!(body_value(r#"{"ok":true}"#.into()), json!({"ok": true}));
        assert_eq!(body_value("saved".into()), Value::String("saved".into()));
    }

    #[test]
    fn test_api_error() {
        match api_error(400, r#"{"error": "Missing item_type"}"#) {
            Error::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("Missing item_type"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
