use super::PageController;
use crate::components::icons::Trash2;
use leptos::prelude::*;
use userdesk_shared::User;
use userdesk_shared::users::UsersState;

#[component]
pub fn UserTable(state: RwSignal<UsersState>, ctrl: PageController) -> impl IntoView {
    let users = move || state.with(|s| s.users.clone());
    let loading = move || state.with(|s| s.loading);
    let is_empty = move || state.with(|s| s.users.is_empty());

    view! {
        <div class="overflow-x-auto w-full">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Username"</th>
                        <th>"Role"</th>
                        <th class="hidden md:table-cell">"User ID"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || is_empty() && !loading()>
                        <tr>
                            <td colspan="4" class="text-center py-8 text-base-content/50">
                                "No users found."
                            </td>
                        </tr>
                    </Show>
                    <Show when=move || is_empty() && loading()>
                        <tr>
                            <td colspan="4" class="text-center py-8">
                                <span class="loading loading-spinner loading-md text-primary"></span>
                            </td>
                        </tr>
                    </Show>
                    <For
                        each=users
                        key=|user| user.uuid.clone()
                        children=move |user: User| {
                            let ctrl = ctrl.clone();
                            let badge = if user.role.is_admin() { "badge badge-primary" } else { "badge badge-ghost" };
                            let title = user.role.title();
                            let username = user.username.clone();
                            let uuid = user.uuid.clone();
                            view! {
                                <tr>
                                    <td class="font-medium">{username}</td>
                                    <td><span class=badge>{title}</span></td>
                                    <td class="hidden md:table-cell font-mono text-xs">{uuid}</td>
                                    <td class="text-right">
                                        <button
                                            class="btn btn-ghost btn-sm text-error"
                                            on:click=move |_| {
                                                ctrl.request_delete(user.clone());
                                            }
                                        >
                                            <Trash2 attr:class="h-4 w-4" />
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
