//! HTTPトランスポート
//!
//! ApiClient はこのトレイト越しに通信する。本番は reqwest 実装。

use crate::config::Config;
use crate::error::{CountVisionError, Result};
use count_vision_common::api::{api_error, body_value};
use count_vision_common::{Endpoint, Method};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::time::Duration;

/// multipartで送る画像1枚
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// multipartフォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub files: Vec<FilePart>,
    pub fields: Vec<(String, String)>,
}

impl MultipartForm {
    pub fn file(mut self, field: &str, file_name: &str, bytes: Vec<u8>) -> Self {
        self.files.push(FilePart {
            field: field.to_string(),
            file_name: file_name.to_string(),
            bytes,
        });
        self
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[allow(async_fn_in_trait)]
pub trait Transport {
    /// JSONリクエスト（GETはbodyなし）
    async fn send_json(&self, endpoint: &Endpoint, body: Option<Value>) -> Result<Value>;

    async fn send_multipart(&self, endpoint: &Endpoint, form: MultipartForm) -> Result<Value>;
}

/// reqwestによるトランスポート
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("count-vision/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url(),
        })
    }

    fn request(&self, endpoint: &Endpoint) -> reqwest::RequestBuilder {
        let url = endpoint.url(&self.base_url);
        tracing::debug!("{} {}", endpoint.method().as_str(), url);
        match endpoint.method() {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        }
    }
}

impl Transport for HttpTransport {
    async fn send_json(&self, endpoint: &Endpoint, body: Option<Value>) -> Result<Value> {
        let mut request = self.request(endpoint);
        if let Some(body) = body {
            request = request.json(&body);
        }
        read_response(request.send().await?).await
    }

    async fn send_multipart(&self, endpoint: &Endpoint, form: MultipartForm) -> Result<Value> {
        let mut multipart = Form::new();
        for file in form.files {
            let part = Part::bytes(file.bytes)
                .file_name(file.file_name.clone())
                .mime_str(image_mime_type(&file.file_name))?;
            multipart = multipart.part(file.field, part);
        }
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }
        read_response(self.request(endpoint).multipart(multipart).send().await?).await
    }
}

/// ステータス確認とJSON化（空の本体は null、JSONでない本体は文字列）
async fn read_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    tracing::debug!("status {} ({} bytes)", status, text.len());

    if !status.is_success() {
        return Err(CountVisionError::Common(api_error(status.as_u16(), &text)));
    }
    Ok(body_value(text))
}

/// 拡張子からMIMEタイプ
pub fn image_mime_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}
