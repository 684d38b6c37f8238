//! 通知スタックコンポーネント

use crate::app::use_app;
use count_vision_common::Notice;
use leptos::prelude::*;

/// 同時に表示する通知の上限
pub const MAX_NOTICES: usize = 3;

/// 自動で消えるまでの時間（ミリ秒）
pub const NOTICE_DURATION_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeEntry {
    pub id: u64,
    pub notice: Notice,
}

/// 通知を追加（上限を超えたら古いものから消す）
pub fn push_notice(list: &mut Vec<NoticeEntry>, entry: NoticeEntry) {
    list.push(entry);
    if list.len() > MAX_NOTICES {
        let overflow = list.len() - MAX_NOTICES;
        list.drain(..overflow);
    }
}

#[component]
pub fn NoticeStack() -> impl IntoView {
    let state = use_app();

    view! {
        <div class="notice-stack">
            <For
                each=move || state.notices.get()
                key=|entry| entry.id
                children=move |entry| {
                    let id = entry.id;
                    view! {
                        <div
                            class=format!("notice notice-{}", entry.notice.level.as_str())
                            on:click=move |_| state.dismiss(id)
                        >
                            {entry.notice.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
