use crate::{Claims, Role, claims_or_none};

pub const ACCOUNT_LOAD_FAILED: &str = "Failed to load user information";

/// 账户页的展示状态，完全由当前令牌投影而来
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AccountView {
    #[default]
    Loading,
    Ready(Claims),
    Failed,
}

impl AccountView {
    pub fn from_token(token: Option<&str>) -> Self {
        match token.and_then(claims_or_none) {
            Some(claims) => Self::Ready(claims),
            None => Self::Failed,
        }
    }
}

/// 账户页底部的功能标签
pub fn account_features(role: Role) -> Vec<&'static str> {
    let mut features = vec!["Profile Management", "Security Settings", "Activity Log"];
    if role.is_admin() {
        features.push("Admin Panel");
    }
    features
}
