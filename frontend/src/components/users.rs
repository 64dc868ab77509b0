use crate::components::icons::*;
use crate::session::use_session;
use crate::state::SignalState;
use crate::web::FetchClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use userdesk_shared::users::{NOTIFICATION_TIMEOUT, UsersController, UsersState};

mod dialogs;
mod user_table;

use dialogs::{ConfirmDeleteDialog, ConfirmLogoutDialog, CreateUserDialog};
use user_table::UserTable;

type PageController = UsersController<FetchClient, SignalState<UsersState>>;

#[component]
pub fn UsersPage() -> impl IntoView {
    let session = use_session();
    let state = SignalState::new(UsersState::default());
    let ctrl: PageController = UsersController::new(session.api(), state);
    let state = state.signal();

    // 初始加载
    spawn_local({
        let ctrl = ctrl.clone();
        async move { ctrl.refresh().await }
    });

    // 删除失败的提示定时消失，只清除计时开始时的那一次
    Effect::new({
        let ctrl = ctrl.clone();
        move |_| {
            let pending = state.with(|s| s.notification.is_some().then(|| s.notification_seq()));
            if let Some(seq) = pending {
                let ctrl = ctrl.clone();
                set_timeout(move || ctrl.expire_notification(seq), NOTIFICATION_TIMEOUT);
            }
        }
    });

    let loading = move || state.with(|s| s.loading);
    let error = move || state.with(|s| s.error.clone());
    let notification = move || state.with(|s| s.notification.clone());
    let total_users = move || state.with(|s| s.users.len());

    let on_refresh = {
        let ctrl = ctrl.clone();
        move |_| {
            let ctrl = ctrl.clone();
            spawn_local(async move { ctrl.refresh().await });
        }
    };
    let on_create = {
        let ctrl = ctrl.clone();
        move |_| {
            ctrl.open_create();
        }
    };
    let on_logout = {
        let ctrl = ctrl.clone();
        move |_| {
            ctrl.request_logout();
        }
    };
    let on_dismiss = {
        let ctrl = ctrl.clone();
        move |_| ctrl.dismiss_notification()
    };

    view! {
        <div class="space-y-8">
            // 通知提示框
            <Show when=move || notification().is_some()>
                <div class="toast toast-top toast-end z-50">
                    <div role="alert" class="alert alert-error shadow-lg">
                        <span>{move || notification().unwrap_or_default()}</span>
                        <button class="btn btn-ghost btn-xs" on:click=on_dismiss.clone()>"✕"</button>
                    </div>
                </div>
            </Show>

            <div class="flex flex-wrap items-center justify-between gap-4">
                <div>
                    <h2 class="text-2xl font-bold">"Users"</h2>
                    <p class="text-base-content/70 text-sm">"Manage accounts and their roles."</p>
                </div>
                <div class="flex gap-2">
                    <button on:click=on_create class="btn btn-primary gap-2">
                        <Plus attr:class="h-4 w-4" /> "Add User"
                    </button>
                    <button on:click=on_logout class="btn btn-outline gap-2">
                        <LogOut attr:class="h-4 w-4" /> "Logout"
                    </button>
                </div>
            </div>

            <div class="stats shadow bg-base-100">
                <div class="stat">
                    <div class="stat-figure text-primary">
                        <UsersIcon attr:class="h-8 w-8" />
                    </div>
                    <div class="stat-title">"Total Users"</div>
                    <div class="stat-value text-primary">{total_users}</div>
                </div>
            </div>

            <Show when=move || error().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-6 pb-2">
                        <h3 class="card-title">"All Users"</h3>
                        <button on:click=on_refresh disabled=loading class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>
                    <UserTable state=state ctrl=ctrl.clone() />
                </div>
            </div>

            <CreateUserDialog state=state ctrl=ctrl.clone() />
            <ConfirmDeleteDialog state=state ctrl=ctrl.clone() />
            <ConfirmLogoutDialog state=state ctrl=ctrl />
        </div>
    }
}
