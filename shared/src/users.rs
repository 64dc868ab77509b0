//! 用户集合管理
//!
//! 管理员页面的全部交互：列表、创建、删除以及对话框状态。
//! 集合只是服务端最近一次成功列表的快照，所有变更都要经过服务端往返。
//!
//! 删除按目标角色采用不同策略：
//! - 管理员账号：立即从本地移除（乐观更新），失败时重新拉取列表并提示
//! - 普通账号：等待服务端确认，无论成功失败都重新拉取列表
//!
//! 乐观移除在随后的完整列表返回前都只是临时状态。

use std::time::Duration;

use crate::api::UserDeskApi;
use crate::protocol::CreateUserRequest;
use crate::request::HttpClient;
use crate::state::ViewState;
use crate::{Role, User};

#[cfg(test)]
mod tests;

pub const FETCH_USERS_FAILED: &str = "Failed to fetch users. You may not have permission.";
pub const CREATE_USER_FAILED: &str = "Failed to create user.";
pub const DELETE_USER_FAILED: &str = "Failed to delete user.";

/// 删除失败提示自动消失的时间
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

// =========================================================
// 状态定义
// =========================================================

/// 创建用户对话框里的表单，每次打开对话框都是全新的一份
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub error: Option<String>,
    pub submitting: bool,
}

impl CreateForm {
    pub fn to_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            role: self.role,
        }
    }
}

/// 页面上的模态对话框，同一时刻最多一个
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    Create(CreateForm),
    /// 等待用户确认删除
    ConfirmDelete(User),
    /// 删除请求已发出，等待服务端结果
    Deleting(User),
    ConfirmLogout,
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }

    /// 请求进行中（提交中的创建表单或删除），此时对话框不能关闭
    pub fn is_busy(&self) -> bool {
        match self {
            Dialog::Create(form) => form.submitting,
            Dialog::Deleting(_) => true,
            _ => false,
        }
    }

    /// 当前确认或进行中的删除目标
    pub fn delete_target(&self) -> Option<&User> {
        match self {
            Dialog::ConfirmDelete(user) | Dialog::Deleting(user) => Some(user),
            _ => None,
        }
    }
}

/// 删除的最终结果：`resolved` 服务端确认，`reverted` 失败后以服务端列表为准
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Resolved,
    Reverted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub loading: bool,
    /// 页面级错误（列表失败）
    pub error: Option<String>,
    pub dialog: Dialog,
    /// 短暂显示的提示（删除失败）
    pub notification: Option<String>,
    /// 每出现一次提示加一，定时器据此只清除自己那一次
    notification_seq: u64,
    /// 列表请求序号，只应用最新一次请求的结果
    fetch_seq: u64,
}

impl Default for UsersState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            // 页面挂载即开始加载
            loading: true,
            error: None,
            dialog: Dialog::Closed,
            notification: None,
            notification_seq: 0,
            fetch_seq: 0,
        }
    }
}

impl UsersState {
    pub fn notification_seq(&self) -> u64 {
        self.notification_seq
    }
}

// =========================================================
// 控制器
// =========================================================

#[derive(Clone)]
pub struct UsersController<C, S> {
    api: UserDeskApi<C>,
    state: S,
}

impl<C: HttpClient, S: ViewState<UsersState>> UsersController<C, S> {
    pub fn new(api: UserDeskApi<C>, state: S) -> Self {
        Self { api, state }
    }

    /// 拉取完整列表并整体替换本地集合
    pub async fn refresh(&self) {
        let Some(seq) = self.state.write(|s| {
            s.fetch_seq += 1;
            s.loading = true;
            s.error = None;
            s.fetch_seq
        }) else {
            return;
        };

        let result = self.api.list_users().await;

        self.state.write(|s| {
            if s.fetch_seq != seq {
                // 已有更新的列表请求
                return;
            }
            s.loading = false;
            match result {
                Ok(users) => s.users = users,
                Err(e) => {
                    log::error!("[Users] Failed to fetch users: {}", e);
                    s.users.clear();
                    s.error = Some(FETCH_USERS_FAILED.to_string());
                }
            }
        });
    }

    // --- 对话框 ---

    /// 打开对话框，已有其他对话框打开时返回 false
    fn open(&self, dialog: Dialog) -> bool {
        self.state
            .write(|s| {
                if s.dialog.is_open() {
                    return false;
                }
                s.dialog = dialog;
                true
            })
            .unwrap_or(false)
    }

    pub fn open_create(&self) -> bool {
        self.open(Dialog::Create(CreateForm::default()))
    }

    pub fn request_delete(&self, user: User) -> bool {
        self.open(Dialog::ConfirmDelete(user))
    }

    pub fn request_logout(&self) -> bool {
        self.open(Dialog::ConfirmLogout)
    }

    /// 关闭当前对话框；进行中的创建或删除无法取消
    pub fn close_dialog(&self) {
        self.state.write(|s| {
            if !s.dialog.is_busy() {
                s.dialog = Dialog::Closed;
            }
        });
    }

    pub fn edit_create(&self, f: impl FnOnce(&mut CreateForm)) {
        self.state.write(|s| {
            if let Dialog::Create(form) = &mut s.dialog {
                f(form);
            }
        });
    }

    pub fn dismiss_notification(&self) {
        self.state.write(|s| s.notification = None);
    }

    /// 定时器到期，只清除序号仍为 `seq` 的那次提示
    pub fn expire_notification(&self, seq: u64) {
        self.state.write(|s| {
            if s.notification_seq == seq {
                s.notification = None;
            }
        });
    }

    // --- 创建 ---

    /// 提交创建表单
    ///
    /// 成功：关闭对话框并重新拉取列表（不做本地合并）。
    /// 失败：对话框保持打开，表单内展示服务端消息。
    pub async fn submit_create(&self) -> bool {
        let Some(req) = self
            .state
            .write(|s| match &mut s.dialog {
                Dialog::Create(form) if !form.submitting => {
                    form.submitting = true;
                    form.error = None;
                    Some(form.to_request())
                }
                _ => None,
            })
            .flatten()
        else {
            return false;
        };

        match self.api.create_user(&req).await {
            Ok(()) => {
                log::info!("[Users] Created user {}.", req.username);
                self.state.write(|s| {
                    if matches!(s.dialog, Dialog::Create(_)) {
                        s.dialog = Dialog::Closed;
                    }
                });
                self.refresh().await;
                true
            }
            Err(e) => {
                log::warn!("[Users] Failed to create user {}: {}", req.username, e);
                self.edit_create(|form| {
                    form.submitting = false;
                    form.error = Some(e.user_message(CREATE_USER_FAILED));
                });
                false
            }
        }
    }

    // --- 删除 ---

    /// 确认删除当前目标
    ///
    /// 没有待确认目标或删除已在进行中时返回 `None`。
    pub async fn confirm_delete(&self) -> Option<DeleteOutcome> {
        let target = self
            .state
            .write(|s| {
                let Dialog::ConfirmDelete(user) = &s.dialog else {
                    return None;
                };
                let user = user.clone();
                if user.role.is_admin() {
                    s.users.retain(|u| u.uuid != user.uuid);
                }
                s.dialog = Dialog::Deleting(user.clone());
                Some(user)
            })
            .flatten()?;

        let result = self.api.delete_user(&target.uuid).await;

        self.state.write(|s| {
            if s.dialog.delete_target() == Some(&target) {
                s.dialog = Dialog::Closed;
            }
            if let Err(e) = &result {
                s.notification_seq += 1;
                s.notification = Some(e.user_message(DELETE_USER_FAILED));
            }
        });

        let outcome = match result {
            Ok(()) => {
                log::info!("[Users] Deleted user {}.", target.uuid);
                // 管理员账号已经乐观移除，无需再拉取
                if !target.role.is_admin() {
                    self.refresh().await;
                }
                DeleteOutcome::Resolved
            }
            Err(e) => {
                log::warn!("[Users] Failed to delete user {}: {}", target.uuid, e);
                self.refresh().await;
                DeleteOutcome::Reverted
            }
        };
        Some(outcome)
    }
}
