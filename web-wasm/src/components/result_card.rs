//! 結果カードコンポーネント

use crate::api;
use crate::app::use_app;
use crate::components::match_gallery::MatchGallery;
use count_vision_common::correction::{self, correction_label};
use count_vision_common::{CorrectionDrafts, Notice, NormalizedResult, UserCorrections};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 結果1件（画像・一致セグメント・件数・修正フォーム）
///
/// # Arguments
/// * `result` - 正規化済みの結果
/// * `drafts` - 入力中の修正値（ページをまたいで保持）
/// * `corrections` - 送信済みの修正値
#[component]
pub fn ResultCard(
    result: NormalizedResult,
    drafts: RwSignal<CorrectionDrafts>,
    corrections: RwSignal<UserCorrections>,
) -> impl IntoView {
    let state = use_app();
    let (saving, set_saving) = signal(false);
    let key = result.result_id.clone().unwrap_or_default();

    let user_correction = {
        let result = result.clone();
        move || correction_label(corrections.with(|c| c.effective(&result)))
    };

    let on_submit = {
        let key = key.clone();
        let result_id = result.result_id.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if saving.get_untracked() {
                return;
            }
            let draft = drafts.with_untracked(|d| d.get(&key).to_string());
            let request = match correction::prepare(result_id.as_deref(), &draft) {
                Ok(request) => request,
                Err(e) => {
                    state.notify(Notice::from_error(&e, "Correction failed"));
                    return;
                }
            };

            set_saving.set(true);
            spawn_local(async move {
                match api::correct(&request).await {
                    Ok(_) => {
                        corrections.update(|c| c.record(&request));
                        drafts.update(|d| {
                            d.discard(&request.result_id);
                        });
                        state.notify(Notice::success("Correction saved"));
                    }
                    Err(e) => state.notify(Notice::from_error(&e, "Correction failed")),
                }
                set_saving.set(false);
            });
        }
    };

    let draft_value = {
        let key = key.clone();
        move || drafts.with(|d| d.get(&key).to_string())
    };
    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        drafts.update(|d| d.set(&key, value));
    };

    let model_count = result
        .model_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());

    view! {
        <div class="result-card">
            <h3>"Item Type: "{result.item_type.clone().unwrap_or_default()}</h3>
            <div class="result-images">
                {result.image_url.clone().map(|url| view! {
                    <figure>
                        <img src=url alt="Uploaded image" />
                        <figcaption>"Original"</figcaption>
                    </figure>
                })}
                {result.segmentation_or_image().map(|url| view! {
                    <figure>
                        <img src=url.to_string() alt="Segmentation" />
                        <figcaption>"Segmentation"</figcaption>
                    </figure>
                })}
            </div>
            <MatchGallery result=result.clone() />
            <p class="count">"Model Count: "{model_count}</p>
            <p class="count">"User Correction: "{user_correction}</p>
            {result.timestamp.clone().map(|ts| view! { <p class="text-muted">{ts}</p> })}
            <form class="correction-form" on:submit=on_submit>
                <input
                    type="number"
                    min="0"
                    step="1"
                    placeholder="Correct count"
                    prop:value=draft_value
                    on:input=on_input
                />
                <button type="submit" class="btn btn-primary btn-small" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Submit Correction" }}
                </button>
            </form>
        </div>
    }
}
