use crate::components::icons::UserCircle;
use crate::session::use_session;
use leptos::prelude::*;
use userdesk_shared::account::{ACCOUNT_LOAD_FAILED, AccountView, account_features};

#[component]
pub fn AccountPage() -> impl IntoView {
    let session = use_session();
    let token = session.token_signal();
    let account = RwSignal::new(AccountView::Loading);

    // 账户信息只从令牌解码，不请求服务端
    Effect::new(move |_| {
        let view = token.with(|t| AccountView::from_token(t.as_deref()));
        account.set(view);
    });

    view! {
        <div class="card bg-base-100 shadow-xl max-w-2xl">
            {move || match account.get() {
                AccountView::Loading => view! {
                    <div class="card-body items-center py-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                        <p class="text-base-content/60">"Loading..."</p>
                    </div>
                }
                .into_any(),
                AccountView::Failed => view! {
                    <div class="card-body">
                        <div role="alert" class="alert alert-error">
                            <span>{ACCOUNT_LOAD_FAILED}</span>
                        </div>
                    </div>
                }
                .into_any(),
                AccountView::Ready(claims) => {
                    let features = account_features(claims.role);
                    let badge = if claims.role.is_admin() { "badge badge-primary" } else { "badge badge-ghost" };
                    view! {
                        <div class="card-body gap-6">
                            <div class="flex items-center gap-4">
                                <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                    <UserCircle attr:class="h-10 w-10" />
                                </div>
                                <div>
                                    <h2 class="card-title">{claims.username.clone()}</h2>
                                    <span class=badge>
                                        {claims.role.label()}
                                    </span>
                                </div>
                            </div>

                            <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                                <div>
                                    <p class="text-xs uppercase text-base-content/50">"Username"</p>
                                    <p class="font-medium">{claims.username.clone()}</p>
                                </div>
                                <div>
                                    <p class="text-xs uppercase text-base-content/50">"Role"</p>
                                    <p class="font-medium">{claims.role.title()}</p>
                                </div>
                                <div>
                                    <p class="text-xs uppercase text-base-content/50">"User ID"</p>
                                    <p class="font-mono text-sm break-all">{claims.uuid.clone()}</p>
                                </div>
                            </div>

                            <div>
                                <p class="text-sm font-semibold mb-2">"Available Features"</p>
                                <div class="flex flex-wrap gap-2">
                                    {features
                                        .into_iter()
                                        .map(|f| view! { <span class="badge badge-outline">{f}</span> })
                                        .collect_view()}
                                </div>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
