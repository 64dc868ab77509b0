use crate::Claims;
use crate::route::AppRoute;

/// 侧边栏导航项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: AppRoute,
}

const USER_MANAGEMENT: NavItem = NavItem {
    label: "User Management",
    route: AppRoute::Users,
};

const MY_ACCOUNT: NavItem = NavItem {
    label: "My Account",
    route: AppRoute::Account,
};

/// 根据令牌中声明的角色选择菜单，解码失败视同普通用户
pub fn nav_items(claims: Option<&Claims>) -> Vec<NavItem> {
    match claims {
        Some(c) if c.role.is_admin() => vec![USER_MANAGEMENT, MY_ACCOUNT],
        _ => vec![MY_ACCOUNT],
    }
}
