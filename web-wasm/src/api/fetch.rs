//! fetch APIによる通信

use count_vision_common::api::{api_error, body_value, DEFAULT_API_BASE};
use count_vision_common::{Endpoint, Error, Result};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

/// リクエスト本体
pub enum Body {
    Empty,
    Json(Value),
    Form(FormData),
}

/// APIのベースURL（ビルド時の COUNT_VISION_API_URL で上書き）
pub fn api_base() -> &'static str {
    option_env!("COUNT_VISION_API_URL").unwrap_or(DEFAULT_API_BASE)
}

/// エンドポイントへ送信し、本体をJSONで返す
///
/// # Arguments
/// * `endpoint` - 送信先
/// * `body` - リクエスト本体
///
/// # Returns
/// 成功時は本体（空なら null）、失敗時は `Error::Api`（サーバーのメッセージ付き）
pub async fn send(endpoint: &Endpoint, body: Body) -> Result<Value> {
    let url = endpoint.url(api_base());

    let opts = RequestInit::new();
    opts.set_method(endpoint.method().as_str());
    opts.set_mode(RequestMode::Cors);
    let is_json = matches!(body, Body::Json(_));
    match &body {
        Body::Empty => {}
        Body::Json(value) => opts.set_body(&JsValue::from_str(&value.to_string())),
        Body::Form(form) => opts.set_body(form),
    }

    let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
    if is_json {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| Error::Transport("window is unavailable".into()))?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        gloo::console::error!(format!("{} {} -> {}", endpoint.method().as_str(), url, resp.status()));
        return Err(api_error(resp.status(), &text));
    }
    Ok(body_value(text))
}

fn js_error(e: JsValue) -> Error {
    Error::Transport(format!("{:?}", e))
}
