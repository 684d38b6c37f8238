//! 登録画面

use crate::api;
use crate::app::use_app;
use crate::components::header::NavLink;
use count_vision_common::api::RegisterForm;
use count_vision_common::{Notice, Route};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let state = use_app();
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let form = RegisterForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };

        set_loading.set(true);
        spawn_local(async move {
            match api::register(&form).await {
                Ok(_) => {
                    state.notify(Notice::success("Registration successful! Please login."));
                    state.navigate(Route::Login);
                }
                Err(e) => state.notify(Notice::from_error(&e, "Registration failed")),
            }
            set_loading.set(false);
        });
    };

    view! {
        <div class="auth-card">
            <h2>"Create an Account"</h2>
            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="name">"Name"</label>
                    <input
                        type="text"
                        id="name"
                        disabled=move || loading.get()
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        type="email"
                        id="email"
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
                        placeholder="Create a password"
                        disabled=move || loading.get()
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="confirm-password">"Confirm Password"</label>
                    <input
                        type="password"
                        id="confirm-password"
                        placeholder="Confirm your password"
                        disabled=move || loading.get()
                        prop:value=move || confirm_password.get()
                        on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                    {move || if loading.get() { "Registering..." } else { "Register" }}
                </button>
            </form>
            <p class="auth-switch">"Already have an account? "<NavLink route=Route::Login /></p>
        </div>
    }
}
