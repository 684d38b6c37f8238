//! ヘッダーコンポーネント

use crate::app::use_app;
use count_vision_common::{Route, Session};
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let state = use_app();
    let logged_in = move || state.session.with(Session::is_logged_in);

    view! {
        <header class="header">
            <h1>"AI Image Detection Dashboard"</h1>
            <nav class="nav">
                <Show
                    when=logged_in
                    fallback=|| view! {
                        <NavLink route=Route::Login />
                        <NavLink route=Route::Register />
                    }
                >
                    <NavLink route=Route::Home />
                    <NavLink route=Route::Results />
                    <span class="user-name">
                        {move || state.session.with(Session::display_name).unwrap_or_default()}
                    </span>
                    <button class="btn btn-tertiary btn-small" on:click=move |_| state.sign_out()>
                        "Logout"
                    </button>
                </Show>
            </nav>
        </header>
    }
}

/// 画面遷移リンク
#[component]
pub fn NavLink(route: Route) -> impl IntoView {
    let state = use_app();

    view! {
        <a
            href=route.path()
            class:active=move || state.route.get() == route
            on:click=move |ev| {
                ev.prevent_default();
                state.navigate(route);
            }
        >
            {route.title()}
        </a>
    }
}
