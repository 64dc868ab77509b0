//! 用户页的模态对话框
//!
//! 打开哪一个完全由 [`Dialog`] 决定，组件本身不持有开关状态。

use super::PageController;
use crate::components::icons::{LogOut, Plus, Trash2};
use crate::session::use_session;
use crate::web::router::use_router;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use userdesk_shared::users::{CreateForm, Dialog, UsersState};
use userdesk_shared::{Role, User};

/// 原生 `<dialog>` 封装，`open` 变化时调用 showModal/close
#[component]
fn Modal(
    #[prop(into)] open: Signal<bool>,
    /// Esc 触发的关闭请求，是否真正关闭由调用方决定
    #[prop(into)]
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let dialog_ref = NodeRef::<html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog
            class="modal"
            node_ref=dialog_ref
            on:cancel=move |ev: web_sys::Event| {
                ev.prevent_default();
                on_close.run(());
            }
        >
            <div class="modal-box">{children()}</div>
        </dialog>
    }
}

// =========================================================
// 创建用户
// =========================================================

fn create_field<R: Default>(state: RwSignal<UsersState>, f: impl Fn(&CreateForm) -> R) -> R {
    state.with(|s| match &s.dialog {
        Dialog::Create(form) => f(form),
        _ => R::default(),
    })
}

#[component]
pub fn CreateUserDialog(state: RwSignal<UsersState>, ctrl: PageController) -> impl IntoView {
    let open = Signal::derive(move || state.with(|s| matches!(s.dialog, Dialog::Create(_))));
    let submitting = move || create_field(state, |f| f.submitting);
    let error = move || create_field(state, |f| f.error.clone());

    let on_close = Callback::new({
        let ctrl = ctrl.clone();
        move |_: ()| ctrl.close_dialog()
    });

    let on_submit = {
        let ctrl = ctrl.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let ctrl = ctrl.clone();
            spawn_local(async move {
                ctrl.submit_create().await;
            });
        }
    };

    let on_username = {
        let ctrl = ctrl.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            ctrl.edit_create(|f| f.username = value);
        }
    };
    let on_password = {
        let ctrl = ctrl.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            ctrl.edit_create(|f| f.password = value);
        }
    };
    let on_role = move |ev: leptos::ev::Event| {
        let role = Role::parse(&event_target_value(&ev)).unwrap_or_default();
        ctrl.edit_create(|f| f.role = role);
    };

    view! {
        <Modal open=open on_close=on_close>
            <h3 class="font-bold text-lg">"Add User"</h3>
            <p class="py-4 text-base-content/70">"Create a new account."</p>

            <form on:submit=on_submit class="space-y-4">
                <Show when=move || error().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="form-control">
                    <label for="new_username" class="label">
                        <span class="label-text">"Username"</span>
                    </label>
                    <input id="new_username" required
                        type="text"
                        on:input=on_username
                        prop:value=move || create_field(state, |f| f.username.clone())
                        class="input input-bordered w-full"
                    />
                </div>

                <div class="form-control">
                    <label for="new_password" class="label">
                        <span class="label-text">"Password"</span>
                    </label>
                    <input id="new_password" required
                        type="password"
                        on:input=on_password
                        prop:value=move || create_field(state, |f| f.password.clone())
                        class="input input-bordered w-full"
                    />
                </div>

                <div class="form-control">
                    <label class="label">
                        <span class="label-text">"Role"</span>
                    </label>
                    <select class="select select-bordered w-full" on:change=on_role>
                        <option value="user" selected=move || create_field(state, |f| f.role) == Role::User>"User"</option>
                        <option value="admin" selected=move || create_field(state, |f| f.role) == Role::Admin>"Admin"</option>
                    </select>
                </div>

                <div class="modal-action">
                    <button type="button" class="btn" disabled=submitting on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn btn-primary gap-2" disabled=submitting>
                        {move || if submitting() {
                            view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                        } else {
                            view! { <Plus attr:class="h-4 w-4" /> "Create" }.into_any()
                        }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

// =========================================================
// 删除确认
// =========================================================

#[component]
pub fn ConfirmDeleteDialog(state: RwSignal<UsersState>, ctrl: PageController) -> impl IntoView {
    let open = Signal::derive(move || state.with(|s| s.dialog.delete_target().is_some()));
    let deleting = move || state.with(|s| matches!(s.dialog, Dialog::Deleting(_)));
    let target_name = move || {
        state.with(|s| s.dialog.delete_target().map(|u: &User| u.username.clone()).unwrap_or_default())
    };

    let on_close = Callback::new({
        let ctrl = ctrl.clone();
        move |_: ()| ctrl.close_dialog()
    });

    let on_confirm = move |_| {
        let ctrl = ctrl.clone();
        spawn_local(async move {
            ctrl.confirm_delete().await;
        });
    };

    view! {
        <Modal open=open on_close=on_close>
            <h3 class="font-bold text-lg">"Delete User"</h3>
            <p class="py-4">
                "Are you sure you want to delete "
                <span class="font-semibold">{target_name}</span>
                "? This action cannot be undone."
            </p>
            <div class="modal-action">
                <button class="btn" disabled=deleting on:click=move |_| on_close.run(())>"Cancel"</button>
                <button class="btn btn-error gap-2" disabled=deleting on:click=on_confirm>
                    {move || if deleting() {
                        view! { <span class="loading loading-spinner"></span> "Deleting..." }.into_any()
                    } else {
                        view! { <Trash2 attr:class="h-4 w-4" /> "Delete" }.into_any()
                    }}
                </button>
            </div>
        </Modal>
    }
}

// =========================================================
// 登出确认
// =========================================================

#[component]
pub fn ConfirmLogoutDialog(state: RwSignal<UsersState>, ctrl: PageController) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let open = Signal::derive(move || state.with(|s| s.dialog == Dialog::ConfirmLogout));

    let on_close = Callback::new({
        let ctrl = ctrl.clone();
        move |_: ()| ctrl.close_dialog()
    });

    let on_confirm = move |_| {
        ctrl.close_dialog();
        let target = session.logout();
        router.navigate(target);
    };

    view! {
        <Modal open=open on_close=on_close>
            <h3 class="font-bold text-lg">"Logout"</h3>
            <p class="py-4">"Are you sure you want to log out?"</p>
            <div class="modal-action">
                <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                <button class="btn btn-error gap-2" on:click=on_confirm>
                    <LogOut attr:class="h-4 w-4" /> "Logout"
                </button>
            </div>
        </Modal>
    }
}
