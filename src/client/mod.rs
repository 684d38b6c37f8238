//! カウントサービスAPIクライアント
//!
//! 各操作はローカル検証 → セッション確認 → 通信 の順に行う。
//! 検証に失敗した場合は通信しない。再試行はしない。

mod transport;

pub use transport::{image_mime_type, FilePart, HttpTransport, MultipartForm, Transport};

use crate::error::{CountVisionError, Result};
use count_vision_common::api::{
    batch_results_from_value, login_response_from_value, result_from_value, results_from_value,
    validate_upload, RegisterForm,
};
use count_vision_common::{
    correction, CorrectionRequest, DetectionResult, Endpoint, LoginRequest, LoginResponse, Session,
};
use serde_json::Value;
use std::path::Path;

/// アップロードする画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub async fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CountVisionError::FileNotFound(path.display().to_string()));
        }
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }
}

pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// ユーザー登録
    pub async fn register(&self, form: &RegisterForm) -> Result<Value> {
        let request = form.validate()?;
        self.transport
            .send_json(&Endpoint::Register, Some(serde_json::to_value(&request)?))
            .await
    }

    /// ログインしてセッションに user_id を保存
    pub async fn login(&self, session: &mut Session, email: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest::new(email, password)?;
        let body = self
            .transport
            .send_json(&Endpoint::Login, Some(serde_json::to_value(&request)?))
            .await?;
        let response = login_response_from_value(body)?;
        session.apply_login(&response);
        tracing::debug!("login user_id={:?}", response.user_id);
        Ok(response)
    }

    /// 画像1枚をアップロードしてカウント
    pub async fn count(&self, session: &Session, image: ImageFile, item_type: &str) -> Result<DetectionResult> {
        let item_type = validate_upload(&[image.file_name.as_str()], item_type)?;
        let user_id = session.require_user_id()?;

        let form = MultipartForm::default()
            .file("image", &image.file_name, image.bytes)
            .text("item_type", &item_type)
            .text("user_id", user_id);
        let body = self.transport.send_multipart(&Endpoint::Count, form).await?;
        Ok(result_from_value(body)?)
    }

    /// 複数画像を一括アップロード
    pub async fn batch_count(
        &self,
        session: &Session,
        images: Vec<ImageFile>,
        item_type: &str,
    ) -> Result<Vec<DetectionResult>> {
        let names: Vec<&str> = images.iter().map(|i| i.file_name.as_str()).collect();
        let item_type = validate_upload(&names, item_type)?;
        let user_id = session.require_user_id()?;

        let mut form = MultipartForm::default();
        for image in images {
            form = form.file("images", &image.file_name, image.bytes);
        }
        let form = form.text("item_type", &item_type).text("user_id", user_id);

        let body = self.transport.send_multipart(&Endpoint::BatchCount, form).await?;
        Ok(batch_results_from_value(body))
    }

    /// 過去の結果を取得
    pub async fn previous_results(&self, session: &Session) -> Result<Vec<DetectionResult>> {
        let endpoint = Endpoint::PreviousResults {
            user_id: session.require_user_id()?.to_string(),
        };
        let body = self.transport.send_json(&endpoint, None).await?;
        Ok(results_from_value(body))
    }

    /// 件数修正を送信（空のドラフトは送らない）
    pub async fn correct(&self, result_id: Option<&str>, draft: &str) -> Result<CorrectionRequest> {
        let request = correction::prepare(result_id, draft)?;
        self.transport
            .send_json(&Endpoint::Correct, Some(serde_json::to_value(&request)?))
            .await?;
        Ok(request)
    }
}
