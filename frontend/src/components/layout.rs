//! 已认证页面的外壳：侧边导航、顶部标题与登出入口
//!
//! 菜单只根据令牌中声明的角色挑选，真正的权限由服务端裁决。

use crate::components::icons::*;
use crate::session::use_session;
use crate::web::router::use_router;
use leptos::prelude::*;
use userdesk_shared::AppRoute;
use userdesk_shared::layout::{NavItem, nav_items};

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let claims = session.claims_signal();
    let current_route = router.current_route();

    let items = move || claims.with(|c| nav_items(c.as_ref()));
    let username = move || claims.with(|c| c.as_ref().map(|c| c.username.clone()).unwrap_or_default());
    let role_label = move || claims.with(|c| c.as_ref().map(|c| c.role.label()).unwrap_or_default());
    let avatar = move || {
        claims.with(|c| c.as_ref().and_then(|c| c.initial()).unwrap_or_else(|| "?".to_string()))
    };

    let on_logout = move |_| {
        let target = session.logout();
        router.navigate(target);
    };

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200 font-sans">
            <input id="nav-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-base-100 shadow-sm px-4">
                    <div class="flex-none lg:hidden">
                        <label for="nav-drawer" class="btn btn-square btn-ghost">
                            <Menu attr:class="h-5 w-5" />
                        </label>
                    </div>
                    <div class="flex-1">
                        <h1 class="text-xl font-semibold">{move || current_route.get().title()}</h1>
                    </div>
                    <div class="flex-none">
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                    </div>
                </div>
                <main class="flex-1 p-4 md:p-8">
                    <div class="max-w-7xl mx-auto">{children()}</div>
                </main>
            </div>

            <div class="drawer-side">
                <label for="nav-drawer" class="drawer-overlay"></label>
                <aside class="w-64 min-h-full bg-base-100 flex flex-col">
                    <div class="flex items-center gap-2 p-4 border-b border-base-200">
                        <ShieldCheck attr:class="h-6 w-6 text-primary" />
                        <span class="text-lg font-bold">"UserDesk"</span>
                    </div>
                    <ul class="menu flex-1 p-4 gap-1">
                        <For
                            each=items
                            key=|item| item.label
                            children=move |item: NavItem| {
                                let is_active = move || current_route.get() == item.route;
                                view! {
                                    <li>
                                        <a
                                            class=move || if is_active() { "active" } else { "" }
                                            on:click=move |_| router.navigate(item.route)
                                        >
                                            {nav_icon(item.route)}
                                            {item.label}
                                        </a>
                                    </li>
                                }
                            }
                        />
                    </ul>
                    <div class="flex items-center gap-3 p-4 border-t border-base-200">
                        <div class="avatar placeholder">
                            <div class="bg-primary text-primary-content w-10 rounded-full">
                                <span>{avatar}</span>
                            </div>
                        </div>
                        <div class="min-w-0">
                            <p class="font-medium truncate">{username}</p>
                            <p class="text-xs text-base-content/60">{role_label}</p>
                        </div>
                    </div>
                </aside>
            </div>
        </div>
    }
}

fn nav_icon(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Users => view! { <UsersIcon attr:class="h-4 w-4" /> }.into_any(),
        _ => view! { <UserCircle attr:class="h-4 w-4" /> }.into_any(),
    }
}
