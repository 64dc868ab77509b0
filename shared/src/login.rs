use crate::api::UserDeskApi;
use crate::protocol::LoginResponse;
use crate::request::HttpClient;
use crate::state::ViewState;

pub const LOGIN_FAILED: &str = "Login failed.";
pub const CREDENTIALS_REQUIRED: &str = "Username and password are required.";

/// 登录表单状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

/// 登录表单控制器
///
/// 登录失败只在表单内展示错误，不触碰已有会话。
#[derive(Clone)]
pub struct LoginController<C, S> {
    api: UserDeskApi<C>,
    state: S,
}

impl<C: HttpClient, S: ViewState<LoginForm>> LoginController<C, S> {
    pub fn new(api: UserDeskApi<C>, state: S) -> Self {
        Self { api, state }
    }

    pub fn edit(&self, f: impl FnOnce(&mut LoginForm)) {
        self.state.write(f);
    }

    /// 提交表单，成功时返回令牌与角色交给会话控制器
    ///
    /// 请求进行中重复提交直接忽略。
    pub async fn submit(&self) -> Option<LoginResponse> {
        let creds = self
            .state
            .write(|form| {
                if form.submitting {
                    return None;
                }
                if form.username.trim().is_empty() || form.password.is_empty() {
                    form.error = Some(CREDENTIALS_REQUIRED.to_string());
                    return None;
                }
                form.submitting = true;
                form.error = None;
                Some((form.username.clone(), form.password.clone()))
            })
            .flatten()?;

        let result = self.api.login(creds.0, creds.1).await;

        self.state.write(|form| {
            form.submitting = false;
            if let Err(e) = &result {
                log::warn!("[Login] {}", e);
                form.error = Some(e.user_message(LOGIN_FAILED));
            }
        })?;

        result.ok()
    }
}
