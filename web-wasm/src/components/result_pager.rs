//! 結果を1件ずつ表示するページャー

use crate::components::{pagination_bar::PaginationBar, result_card::ResultCard};
use count_vision_common::{CorrectionDrafts, NormalizedResult, Paginator, UserCorrections};
use leptos::prelude::*;

/// 現在ページのページャー（ページは件数に合わせて丸める）
pub fn pager_at(total: usize, page: usize) -> Paginator {
    let mut pager = Paginator::new(total);
    pager.go_to(page);
    pager
}

#[component]
pub fn ResultPager(#[prop(into)] results: Signal<Vec<NormalizedResult>>) -> impl IntoView {
    let page = RwSignal::new(1usize);
    let drafts = RwSignal::new(CorrectionDrafts::default());
    let corrections = RwSignal::new(UserCorrections::default());

    let pager = Signal::derive(move || pager_at(results.with(Vec::len), page.get()));

    let on_previous = move |_: ()| {
        let mut p = pager.get_untracked();
        p.previous();
        page.set(p.page());
    };
    let on_next = move |_: ()| {
        let mut p = pager.get_untracked();
        p.next();
        page.set(p.page());
    };

    let current = move || {
        let p = pager.get();
        results.with(|all| {
            p.current_slice(all)
                .iter()
                .cloned()
                .map(|result| view! {
                    <ResultCard result=result drafts=drafts corrections=corrections />
                })
                .collect_view()
        })
    };

    view! {
        <div class="result-pager">
            {current}
            <PaginationBar pager=pager on_previous=on_previous on_next=on_next />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pager_at_clamps() {
        assert_eq!(pager_at(3, 5).page(), 3);
        assert_eq!(pager_at(3, 0).page(), 1);
        assert_eq!(pager_at(0, 2).page(), 1);
    }

    #[test]
    fn test_pager_at_single_item_hides_controls() {
        let pager = pager_at(1, 1);
        assert!(!pager.shows_controls());
        assert!(!pager.has_next());
    }
}
