//! ページ送りコンポーネント

use count_vision_common::Paginator;
use leptos::prelude::*;

#[component]
pub fn PaginationBar<FP, FN>(
    pager: Signal<Paginator>,
    on_previous: FP,
    on_next: FN,
) -> impl IntoView
where
    FP: Fn(()) + 'static + Clone + Send + Sync,
    FN: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <Show when=move || pager.get().shows_controls()>
            <div class="pagination-bar">
                <button
                    class="btn btn-secondary btn-small"
                    disabled=move || !pager.get().has_previous()
                    on:click={
                        let on_previous = on_previous.clone();
                        move |_| on_previous(())
                    }
                >
                    "Previous"
                </button>
                <span class="page-label">{move || pager.get().label()}</span>
                <button
                    class="btn btn-secondary btn-small"
                    disabled=move || !pager.get().has_next()
                    on:click={
                        let on_next = on_next.clone();
                        move |_| on_next(())
                    }
                >
                    "Next"
                </button>
            </div>
        </Show>
    }
}
