//! 会话上下文
//!
//! 令牌只由这里持有，通过 Context 注入到需要它的页面，没有任何全局可变状态。
//! 路由服务只依赖注入的认证信号。

use leptos::prelude::*;
use userdesk_shared::session::{SessionController, SessionState};
use userdesk_shared::{AppRoute, Claims, UserDeskApi};

use crate::config::API_BASE_URL;
use crate::state::SignalState;
use crate::web::{BrowserTokenStore, FetchClient};

pub type BrowserApi = UserDeskApi<FetchClient>;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: SignalState<SessionState>,
    controller: SessionController<BrowserTokenStore, SignalState<SessionState>>,
}

impl SessionContext {
    /// 创建会话上下文并从 LocalStorage 恢复令牌（仅此一次）
    pub fn new() -> Self {
        let state = SignalState::new(SessionState::default());
        let controller = SessionController::new(BrowserTokenStore, state);
        controller.restore();
        Self { state, controller }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state.signal();
        Signal::derive(move || state.with(SessionState::is_authenticated))
    }

    pub fn claims_signal(&self) -> Signal<Option<Claims>> {
        let state = self.state.signal();
        Signal::derive(move || state.with(SessionState::claims))
    }

    pub fn token_signal(&self) -> Signal<Option<String>> {
        let state = self.state.signal();
        Signal::derive(move || state.with(|s| s.token.clone()))
    }

    /// 未认证的 API 客户端（登录用）
    pub fn anonymous_api(&self) -> BrowserApi {
        UserDeskApi::new(FetchClient, API_BASE_URL)
    }

    /// 携带当前令牌的 API 客户端
    pub fn api(&self) -> BrowserApi {
        let api = self.anonymous_api();
        match self.controller.token() {
            Some(token) => api.with_token(token),
            None => api,
        }
    }

    pub fn login(&self, token: String, role: &str) -> AppRoute {
        self.controller.login(token, role)
    }

    pub fn logout(&self) -> AppRoute {
        self.controller.logout()
    }
}

/// 创建会话上下文并放入 Context
pub fn provide_session() -> SessionContext {
    let ctx = SessionContext::new();
    provide_context(ctx);
    ctx
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
