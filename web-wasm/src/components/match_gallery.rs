//! 一致セグメントの表示
//!
//! 合成画像があればそれを1枚、なければ一致リストから安定サンプリングしたサムネイル。

use count_vision_common::{display_mode, MatchDisplay, NormalizedResult, SampleBounds};
use leptos::prelude::*;

#[component]
pub fn MatchGallery(result: NormalizedResult, #[prop(optional)] bounds: SampleBounds) -> impl IntoView {
    let key = result.result_id.clone().unwrap_or_default();

    let content = match display_mode(&result) {
        MatchDisplay::Merged(url) => Some(
            view! {
                <figure class="merged-match">
                    <img src=url.to_string() alt="Matched segments" />
                    <figcaption>"Matched Segments"</figcaption>
                </figure>
            }
            .into_any(),
        ),
        MatchDisplay::Gallery(matches) => {
            let total = matches.len();
            let selected = bounds.select(matches, &key);
            let caption = format!("Matched Segments ({} of {})", selected.len(), total);
            Some(
                view! {
                    <div class="match-gallery">
                        <h4>{caption}</h4>
                        <div class="thumbnails">
                            {selected
                                .into_iter()
                                .map(|m| view! {
                                    <figure class="thumbnail">
                                        <img src=m.url.clone() alt=m.label.clone() />
                                        <figcaption>
                                            <span>"Predicted_Class: "{m.predicted_class.clone()}</span>
                                            <span>"Label: "{m.label.clone()}</span>
                                        </figcaption>
                                    </figure>
                                })
                                .collect_view()}
                        </div>
                    </div>
                }
                .into_any(),
            )
        }
        MatchDisplay::Nothing => None,
    };

    view! { <div class="matches">{content}</div> }
}
