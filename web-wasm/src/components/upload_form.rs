//! アップロードフォームコンポーネント

use crate::api;
use crate::app::use_app;
use count_vision_common::api::ITEM_TYPES;
use count_vision_common::Notice;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{File, HtmlInputElement};

/// アップロード成功時の通知文言
pub fn upload_message(count: usize) -> String {
    match count {
        1 => "Image uploaded successfully!".to_string(),
        n => format!("{} images processed", n),
    }
}

#[component]
pub fn UploadForm() -> impl IntoView {
    let state = use_app();
    let (files, set_files) = signal_local(Vec::<File>::new());
    let (item_type, set_item_type) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_files = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let selected = input
            .files()
            .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
            .unwrap_or_default();
        set_files.set(selected);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let files = files.get_untracked();
        let item_type = item_type.get_untracked();
        let session = state.session.get_untracked();

        set_loading.set(true);
        spawn_local(async move {
            match api::upload(&session, &files, &item_type).await {
                Ok(results) => {
                    state.notify(Notice::success(upload_message(results.len())));
                    state.show_results(results);
                }
                Err(e) => state.notify(Notice::from_error(&e, "Upload failed")),
            }
            set_loading.set(false);
        });
    };

    let file_names = move || {
        files.with(|list| list.iter().map(File::name).collect::<Vec<_>>().join(", "))
    };

    view! {
        <div class="upload-form">
            <h2>"Upload an Image for Detection"</h2>
            <p class="text-muted">
                "Choose one or more images and the item type to get a detected count from the model."
            </p>
            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="images">"Choose Image"</label>
                    <input
                        type="file"
                        id="images"
                        accept="image/*"
                        multiple=true
                        disabled=move || loading.get()
                        on:change=on_files
                    />
                    <p class="file-names">{file_names}</p>
                </div>

                <div class="form-group">
                    <label for="item-type">"Select Item Type"</label>
                    <select
                        id="item-type"
                        disabled=move || loading.get()
                        on:change=move |ev| set_item_type.set(event_target_value(&ev))
                    >
                        <option value="" selected=move || item_type.get().is_empty()>"Choose one..."</option>
                        {ITEM_TYPES
                            .iter()
                            .map(|t| view! {
                                <option value=*t selected=move || item_type.get() == *t>{*t}</option>
                            })
                            .collect_view()}
                    </select>
                </div>

                <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                    {move || if loading.get() { "Processing..." } else { "Upload & Detect" }}
                </button>
            </form>
        </div>
    }
}
