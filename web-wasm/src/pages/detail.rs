//! 直近のアップロード結果

use crate::api;
use crate::app::use_app;
use crate::components::{header::NavLink, result_pager::ResultPager};
use count_vision_common::{normalize_all, Route};
use leptos::prelude::*;

#[component]
pub fn DetailPage() -> impl IntoView {
    let state = use_app();
    let results = Signal::derive(move || state.latest.with(|raw| normalize_all(raw, &api::static_base())));

    view! {
        <div class="detail-page">
            <h2>"Detection Result"</h2>
            <Show
                when=move || state.latest.with(|raw| !raw.is_empty())
                fallback=|| view! {
                    <p class="text-muted">"No detection result yet. "<NavLink route=Route::Home /></p>
                }
            >
                <ResultPager results=results />
            </Show>
        </div>
    }
}
