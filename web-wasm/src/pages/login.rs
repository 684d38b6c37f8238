//! ログイン画面

use crate::api;
use crate::app::use_app;
use crate::components::header::NavLink;
use count_vision_common::{Notice, Route};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let state = use_app();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();

        set_loading.set(true);
        spawn_local(async move {
            match api::login(&email, &password).await {
                Ok(response) => {
                    state.notify(Notice::for_login(&response));
                    if response.user_id.is_some() {
                        state.sign_in(&response);
                        state.navigate(Route::Results);
                    }
                }
                Err(e) => state.notify(Notice::from_error(&e, "Login failed")),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="auth-card">
            <h2>"Login to Your Account"</h2>
            <p class="text-muted">"Enter your credentials to access your account"</p>
            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
                        placeholder="Enter your email"
                        disabled=move || loading.get()
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        placeholder="Enter your password"
                        disabled=move || loading.get()
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                    {move || if loading.get() { "Logging in..." } else { "Login" }}
                </button>
            </form>
            <p class="auth-switch">"Don't have an account? "<NavLink route=Route::Register /></p>
        </div>
    }
}
