use crate::components::icons::ShieldCheck;
use crate::session::use_session;
use crate::state::SignalState;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use userdesk_shared::login::{LoginController, LoginForm};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let form = SignalState::new(LoginForm::default());
    let ctrl = LoginController::new(session.anonymous_api(), form);
    let form = form.signal();

    let is_submitting = move || form.with(|f| f.submitting);
    let error_msg = move || form.with(|f| f.error.clone());

    let on_submit = {
        let ctrl = ctrl.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let ctrl = ctrl.clone();
            spawn_local(async move {
                if let Some(resp) = ctrl.submit().await {
                    let landing = session.login(resp.token, &resp.role);
                    router.navigate(landing);
                }
            });
        }
    };

    let on_username = {
        let ctrl = ctrl.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            ctrl.edit(|f| f.username = value);
        }
    };

    let on_password = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        ctrl.edit(|f| f.password = value);
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"UserDesk"</h1>
                        <p class="text-base-content/70">"Sign in to your account"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                                <span>{move || error_msg().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                placeholder="admin"
                                on:input=on_username
                                prop:value=move || form.with(|f| f.username.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=on_password
                                prop:value=move || form.with(|f| f.password.clone())
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=is_submitting>
                                {move || if is_submitting() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
