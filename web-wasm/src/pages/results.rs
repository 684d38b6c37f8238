//! 過去の結果一覧

use crate::api;
use crate::app::use_app;
use crate::components::result_pager::ResultPager;
use count_vision_common::{normalize_all, Notice, NormalizedResult};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ResultsPage() -> impl IntoView {
    let state = use_app();
    let (results, set_results) = signal(Vec::<NormalizedResult>::new());
    let (loading, set_loading) = signal(true);

    let session = state.session.get_untracked();
    spawn_local(async move {
        match api::previous_results(&session).await {
            Ok(raw) => set_results.set(normalize_all(&raw, &api::static_base())),
            Err(e) => state.notify(Notice::from_error(&e, "Failed to fetch results")),
        }
        set_loading.set(false);
    });

    view! {
        <div class="results-page">
            <h2>"Previous Results"</h2>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-muted">"Loading..."</p> }
            >
                <Show
                    when=move || !results.with(Vec::is_empty)
                    fallback=|| view! { <p class="text-muted">"No results found."</p> }
                >
                    <ResultPager results=results />
                </Show>
            </Show>
        </div>
    }
}
