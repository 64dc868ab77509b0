//! UserDesk 平台无关层
//!
//! 领域模型、API 协议与全部交互策略都放在这里，不依赖 DOM，
//! 可以直接在本机运行测试。前端只负责把这些控制器接到浏览器上。

use serde::{Deserialize, Serialize};

pub mod account;
pub mod api;
pub mod claims;
pub mod error;
pub mod layout;
pub mod login;
pub mod protocol;
pub mod request;
pub mod route;
pub mod session;
pub mod state;
pub mod users;

#[cfg(test)]
mod testing;

pub use api::UserDeskApi;
pub use claims::{Claims, claims_or_none, decode_claims};
pub use error::{ApiError, ApiResult, ClaimsError};
pub use route::AppRoute;
pub use state::ViewState;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 生成 Bearer 认证头的值
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// 宽松解析。登录响应中的 role 是原始字符串，未知值返回 `None`。
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// 侧边栏与账户页上的角色标签
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "Standard User",
            Role::Admin => "Administrator",
        }
    }

    /// 表格中的角色徽章
    pub fn title(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

/// 服务端返回的用户记录（不含密码）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uuid: String,
    pub username: String,
    pub role: Role,
}
