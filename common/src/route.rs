//! 画面ルート

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Login,
    Register,
    /// アップロード画面
    Home,
    /// 過去の結果一覧
    Results,
    /// 直近のアップロード結果
    Detail,
}

impl Route {
    pub const ALL: [Route; 5] = [Route::Login, Route::Register, Route::Home, Route::Results, Route::Detail];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::Home => "/home",
            Route::Results => "/results",
            Route::Detail => "/detection-result",
        }
    }

    /// パスからルートを決める（不明なパスはログイン画面）
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or_default()
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Home | Route::Results | Route::Detail)
    }

    /// 未ログインでログイン必須の画面ならログイン画面
    pub fn guarded(self, logged_in: bool) -> Self {
        if self.requires_session() && !logged_in {
            Route::Login
        } else {
            self
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Home => "Upload",
            Route::Results => "Previous Results",
            Route::Detail => "Detection Result",
        }
    }
}
