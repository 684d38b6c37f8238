//! メインアプリケーションコンポーネント

use crate::components::{
    header::Header,
    notice_stack::{push_notice, NoticeEntry, NoticeStack, NOTICE_DURATION_MS},
};
use crate::pages::{
    detail::DetailPage, home::HomePage, login::LoginPage, register::RegisterPage,
    results::ResultsPage,
};
use crate::storage;
use count_vision_common::{DetectionResult, LoginResponse, Notice, Route, Session};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsValue;

/// アプリケーションの状態（contextで共有）
#[derive(Clone, Copy)]
pub struct AppState {
    pub route: RwSignal<Route>,
    pub session: RwSignal<Session>,
    pub notices: RwSignal<Vec<NoticeEntry>>,
    /// 直近のアップロード結果（Detail画面用）
    pub latest: RwSignal<Vec<DetectionResult>>,
    next_notice_id: StoredValue<u64>,
}

impl AppState {
    fn new() -> Self {
        Self {
            route: RwSignal::new(current_route()),
            session: RwSignal::new(storage::load_session()),
            notices: RwSignal::new(Vec::new()),
            latest: RwSignal::new(Vec::new()),
            next_notice_id: StoredValue::new(0),
        }
    }

    /// 画面遷移（履歴に積む）
    pub fn navigate(&self, route: Route) {
        if let Ok(history) = window().history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(route.path()));
        }
        self.route.set(route);
    }

    /// 通知を表示し、一定時間後に消す
    pub fn notify(&self, notice: Notice) {
        let id = self.next_notice_id.get_value();
        self.next_notice_id.set_value(id + 1);
        self.notices.update(|list| push_notice(list, NoticeEntry { id, notice }));

        let notices = self.notices;
        Timeout::new(NOTICE_DURATION_MS, move || {
            notices.update(|list| list.retain(|entry| entry.id != id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|list| list.retain(|entry| entry.id != id));
    }

    /// ログイン結果をセッションに反映して保存
    pub fn sign_in(&self, response: &LoginResponse) {
        self.session.update(|session| session.apply_login(response));
        self.session.with_untracked(storage::save_session);
    }

    pub fn sign_out(&self) {
        self.session.update(Session::clear);
        storage::clear_session();
        self.latest.set(Vec::new());
        self.navigate(Route::Login);
    }

    /// アップロード結果を表示
    pub fn show_results(&self, results: Vec<DetectionResult>) {
        self.latest.set(results);
        self.navigate(Route::Detail);
    }
}

pub fn use_app() -> AppState {
    expect_context::<AppState>()
}

fn current_route() -> Route {
    window()
        .location()
        .pathname()
        .map(|path| Route::from_path(&path))
        .unwrap_or_default()
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(state);

    // ブラウザの戻る・進む
    let _ = window_event_listener(leptos::ev::popstate, move |_| {
        state.route.set(current_route());
    });

    let page = move || {
        let logged_in = state.session.with(Session::is_logged_in);
        match state.route.get().guarded(logged_in) {
            Route::Login => view! { <LoginPage /> }.into_any(),
            Route::Register => view! { <RegisterPage /> }.into_any(),
            Route::Home => view! { <HomePage /> }.into_any(),
            Route::Results => view! { <ResultsPage /> }.into_any(),
            Route::Detail => view! { <DetailPage /> }.into_any(),
        }
    };

    view! {
        <div class="container">
            <Header />
            <main class="page">{page}</main>
            <NoticeStack />
        </div>
    }
}
