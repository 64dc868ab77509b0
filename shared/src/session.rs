//! 会话模块
//!
//! 会话只有一个令牌字符串：登录成功时写入持久化存储，启动时读取一次，
//! 登出时清除。唯一的写入者是 [`SessionController`]。

use crate::route::AppRoute;
use crate::state::ViewState;
use crate::{Claims, Role, claims_or_none};

/// 持久化存储中保存令牌的键
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// 令牌持久化存储
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    /// 返回是否写入成功
    fn save(&self, token: &str) -> bool;
    fn clear(&self) -> bool;
}

/// 会话状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 每次需要时从令牌重新解码，不单独存储
    pub fn claims(&self) -> Option<Claims> {
        self.token.as_deref().and_then(claims_or_none)
    }
}

/// 会话控制器
///
/// 内存状态与持久化存储的唯一拥有者。登录、登出返回接下来应当前往的路由，
/// 实际导航交给调用方的路由服务。
#[derive(Clone, Copy, Debug)]
pub struct SessionController<T, S> {
    store: T,
    state: S,
}

impl<T: TokenStore, S: ViewState<SessionState>> SessionController<T, S> {
    pub fn new(store: T, state: S) -> Self {
        Self { store, state }
    }

    /// 启动时从持久化存储恢复会话，不做刷新或过期检查
    pub fn restore(&self) -> bool {
        let token = self.store.load();
        let restored = token.is_some();
        self.state.write(|s| s.token = token);
        if restored {
            log::info!("[Session] Restored session from storage.");
        }
        restored
    }

    /// 保存令牌并返回落地路由
    pub fn login(&self, token: String, role: &str) -> AppRoute {
        if !self.store.save(&token) {
            log::warn!("[Session] Failed to persist token; session is memory-only.");
        }
        self.state.write(|s| s.token = Some(token));

        let landing = AppRoute::landing_for(Role::parse(role));
        log::info!("[Session] Logged in as {}, landing on {}.", role, landing);
        landing
    }

    /// 清除令牌，总是回到登录页
    pub fn logout(&self) -> AppRoute {
        if !self.store.clear() {
            log::warn!("[Session] Failed to clear persisted token.");
        }
        self.state.write(|s| s.token = None);
        log::info!("[Session] Logged out.");
        AppRoute::Login
    }

    pub fn token(&self) -> Option<String> {
        self.state.read(|s| s.token.clone()).flatten()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read(SessionState::is_authenticated).unwrap_or(false)
    }

    pub fn claims(&self) -> Option<Claims> {
        self.state.read(SessionState::claims).flatten()
    }

    /// 对目标路由执行守卫
    pub fn resolve(&self, route: AppRoute) -> AppRoute {
        route.resolve(self.is_authenticated())
    }
}
