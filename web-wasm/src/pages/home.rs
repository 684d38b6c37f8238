//! アップロード画面

use crate::components::upload_form::UploadForm;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! { <UploadForm /> }
}
