//! UserDesk 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `session`: 会话上下文（令牌唯一持有者）
//! - `web::router`: 路由服务（核心引擎），策略来自共享层
//! - `components`: UI 组件层，状态与交互逻辑由共享层控制器负责

mod components {
    pub mod account;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod users;
}
pub mod config;
mod session;
mod state;

use crate::components::account::AccountPage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::users::UsersPage;
use crate::session::provide_session;

use leptos::prelude::*;
use userdesk_shared::AppRoute;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::BrowserTokenStore;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。`NotFound` 在守卫阶段已被重定向，不会真正渲染。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Users => view! {
            <Layout>
                <UsersPage />
            </Layout>
        }
        .into_any(),
        AppRoute::Account => view! {
            <Layout>
                <AccountPage />
            </Layout>
        }
        .into_any(),
        AppRoute::NotFound => ().into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文（从 LocalStorage 恢复令牌）
    let session = provide_session();

    // 2. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = session.is_authenticated_signal();

    view! {
        // 3. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
