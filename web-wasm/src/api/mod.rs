//! カウントサービスAPI
//!
//! ローカル検証とセッション確認を通ったものだけを送信する。

mod fetch;

pub use fetch::api_base;

use count_vision_common::api::{
    batch_results_from_value, login_response_from_value, result_from_value, results_from_value,
    validate_upload, RegisterForm,
};
use count_vision_common::{
    CorrectionRequest, DetectionResult, Endpoint, Error, LoginRequest, LoginResponse, Result,
    Session, StaticBase,
};
use fetch::{send, Body};
use serde_json::Value;
use web_sys::{File, FormData};

/// 相対パス画像の配信元（APIと同じホスト）
pub fn static_base() -> StaticBase {
    StaticBase::new(api_base())
}

pub async fn register(form: &RegisterForm) -> Result<Value> {
    let request = form.validate()?;
    send(&Endpoint::Register, Body::Json(serde_json::to_value(&request)?)).await
}

pub async fn login(email: &str, password: &str) -> Result<LoginResponse> {
    let request = LoginRequest::new(email, password)?;
    let body = send(&Endpoint::Login, Body::Json(serde_json::to_value(&request)?)).await?;
    login_response_from_value(body)
}

/// 画像をアップロード（1枚なら count、複数なら batch_count）
pub async fn upload(session: &Session, files: &[File], item_type: &str) -> Result<Vec<DetectionResult>> {
    let names: Vec<String> = files.iter().map(File::name).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let item_type = validate_upload(&name_refs, item_type)?;
    let user_id = session.require_user_id()?;

    let (endpoint, field) = match files.len() {
        1 => (Endpoint::Count, "image"),
        _ => (Endpoint::BatchCount, "images"),
    };

    let form = FormData::new().map_err(form_error)?;
    for file in files {
        form.append_with_blob_and_filename(field, file, &file.name())
            .map_err(form_error)?;
    }
    form.append_with_str("item_type", &item_type).map_err(form_error)?;
    form.append_with_str("user_id", user_id).map_err(form_error)?;

    let body = send(&endpoint, Body::Form(form)).await?;
    match endpoint {
        Endpoint::Count => Ok(vec![result_from_value(body)?]),
        _ => Ok(batch_results_from_value(body)),
    }
}

pub async fn previous_results(session: &Session) -> Result<Vec<DetectionResult>> {
    let endpoint = Endpoint::PreviousResults {
        user_id: session.require_user_id()?.to_string(),
    };
    Ok(results_from_value(send(&endpoint, Body::Empty).await?))
}

/// 検証済みの修正値を送信
pub async fn correct(request: &CorrectionRequest) -> Result<Value> {
    send(&Endpoint::Correct, Body::Json(serde_json::to_value(request)?)).await
}

fn form_error(e: wasm_bindgen::JsValue) -> Error {
    Error::Transport(format!("FormData: {:?}", e))
}
