//! セッションの保存（localStorage）

use count_vision_common::Session;
use gloo::storage::{LocalStorage, Storage};

const SESSION_KEY: &str = "count_vision.session";

/// 保存済みセッション（なければ未ログイン）
pub fn load_session() -> Session {
    LocalStorage::get(SESSION_KEY).unwrap_or_default()
}

pub fn save_session(session: &Session) {
    if let Err(e) = LocalStorage::set(SESSION_KEY, session) {
        gloo::console::warn!(format!("セッション保存失敗: {}", e));
    }
}

pub fn clear_session() {
    LocalStorage::delete(SESSION_KEY);
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_session_roundtrip() {
        let session = Session { user_id: Some("u1".into()), ..Default::default() };
        save_session(&session);
        assert_eq!(load_session(), session);

        clear_session();
        assert!(!load_session().is_logged_in());
    }
}
