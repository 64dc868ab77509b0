//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫策略，浏览器侧的路由服务只负责执行。

use std::fmt::Display;

use crate::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 用户管理 (需要认证)
    Users,
    /// 我的账户 (需要认证)
    Account,
    /// 其余任意路径，总会被重定向
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Self::Login,
            "/users" => Self::Users,
            "/account" => Self::Account,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Users => "/users",
            Self::Account => "/account",
            Self::NotFound => "/",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Users | Self::Account)
    }

    /// 登录成功后的落地页：管理员进入用户管理，其余角色进入账户页
    pub fn landing_for(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => Self::Users,
            _ => Self::Account,
        }
    }

    /// 根据认证状态得出实际可达的路由
    ///
    /// - 登录页始终可达（已登录用户访问登录页不会被赶走）
    /// - 受保护页面在未登录时重定向到登录页
    /// - 其余路径：已登录去账户页，否则去登录页
    pub fn resolve(self, is_authenticated: bool) -> Self {
        match self {
            Self::Login => Self::Login,
            route if route.requires_auth() => {
                if is_authenticated {
                    route
                } else {
                    Self::Login
                }
            }
            _ => {
                if is_authenticated {
                    Self::Account
                } else {
                    Self::Login
                }
            }
        }
    }

    /// 顶部栏标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Users => "User Management",
            _ => "My Account",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
