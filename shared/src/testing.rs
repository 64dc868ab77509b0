//! 测试共用组件：内存中的假服务端、令牌存储与可卸载的视图状态

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::protocol::{CreateUserRequest, HttpMethod, LoginRequest};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::session::TokenStore;
use crate::state::ViewState;
use crate::{HEADER_AUTHORIZATION, Role, User};

/// 构造一个载荷可被解码的假令牌
pub fn token_for(username: &str, role: Role, uuid: &str) -> String {
    let payload = json!({ "username": username, "role": role, "uuid": uuid, "exp": 4102444800u64 });
    format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", URL_SAFE_NO_PAD.encode(payload.to_string()))
}

// =========================================================
// FakeServer
// =========================================================

struct Account {
    username: String,
    password: String,
    role: Role,
    uuid: String,
}

#[derive(Default)]
struct ServerState {
    accounts: RefCell<Vec<Account>>,
    users: RefCell<Vec<User>>,
    /// 每个方法一次性的预设响应
    scripted: RefCell<HashMap<HttpMethod, VecDeque<HttpResponse>>>,
    /// 请求日志，用于校验调用顺序
    requests: RefCell<Vec<HttpRequest>>,
    offline: Cell<bool>,
    next_id: Cell<u32>,
    on_send: RefCell<Option<Box<dyn Fn(&HttpRequest)>>>,
}

/// 实现 `/api/login` 与 `/api/users` 的内存服务端
#[derive(Clone, Default)]
pub struct FakeServer {
    inner: Rc<ServerState>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&self, username: &str, password: &str, role: Role) {
        let uuid = format!("acct-{}", username);
        self.inner.accounts.borrow_mut().push(Account {
            username: username.to_string(),
            password: password.to_string(),
            role,
            uuid: uuid.clone(),
        });
        self.seed_user(&uuid, username, role);
    }

    pub fn seed_user(&self, uuid: &str, username: &str, role: Role) {
        self.inner.users.borrow_mut().push(User {
            uuid: uuid.to_string(),
            username: username.to_string(),
            role,
        });
    }

    /// 下一次该方法的请求返回指定错误
    pub fn fail_next(&self, method: HttpMethod, status: u16, body: &str) {
        self.respond_next(method, status, body);
    }

    pub fn respond_next(&self, method: HttpMethod, status: u16, body: &str) {
        self.inner
            .scripted
            .borrow_mut()
            .entry(method)
            .or_default()
            .push_back(HttpResponse::new(status, body));
    }

    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.set(offline);
    }

    /// 每次请求到达（响应之前）时调用
    pub fn on_send(&self, hook: impl Fn(&HttpRequest) + 'static) {
        *self.inner.on_send.borrow_mut() = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.inner.requests.borrow().last().cloned()
    }

    /// 形如 `GET /api/users` 的调用日志
    pub fn call_log(&self) -> Vec<String> {
        self.inner
            .requests
            .borrow()
            .iter()
            .map(|r| {
                let path = r.url.splitn(4, '/').nth(3).unwrap_or_default();
                format!("{} /{}", r.method.as_str(), path)
            })
            .collect()
    }

    fn message(status: u16, message: &str) -> HttpResponse {
        HttpResponse::new(status, json!({ "message": message }).to_string())
    }

    fn route(&self, req: &HttpRequest) -> HttpResponse {
        let path = req.url.splitn(4, '/').nth(3).unwrap_or_default();
        let path = format!("/{}", path);

        if path == "/api/login" {
            return self.login(req);
        }

        if req.header(HEADER_AUTHORIZATION).is_none() {
            return Self::message(401, "Authentication token is missing.");
        }

        match (req.method, path.as_str()) {
            (HttpMethod::Get, "/api/users") => {
                HttpResponse::new(200, serde_json::to_string(&*self.inner.users.borrow()).unwrap())
            }
            (HttpMethod::Post, "/api/users") => self.create(req),
            (HttpMethod::Delete, p) if p.starts_with("/api/users/") => {
                let uuid = &p["/api/users/".len()..];
                let mut users = self.inner.users.borrow_mut();
                let before = users.len();
                users.retain(|u| u.uuid != uuid);
                if users.len() == before {
                    Self::message(404, "User not found.")
                } else {
                    HttpResponse::new(200, json!({ "message": "User deleted." }).to_string())
                }
            }
            _ => Self::message(404, "Not found."),
        }
    }

    fn login(&self, req: &HttpRequest) -> HttpResponse {
        let Some(creds) = req
            .body
            .as_deref()
            .and_then(|b| serde_json::from_str::<LoginRequest>(b).ok())
        else {
            return Self::message(400, "Username and password are required.");
        };

        let accounts = self.inner.accounts.borrow();
        match accounts
            .iter()
            .find(|a| a.username == creds.username && a.password == creds.password)
        {
            Some(a) => HttpResponse::new(
                200,
                json!({
                    "token": token_for(&a.username, a.role, &a.uuid),
                    "role": a.role,
                    "username": a.username,
                })
                .to_string(),
            ),
            None => Self::message(401, "Invalid credentials."),
        }
    }

    fn create(&self, req: &HttpRequest) -> HttpResponse {
        let Some(new_user) = req
            .body
            .as_deref()
            .and_then(|b| serde_json::from_str::<CreateUserRequest>(b).ok())
        else {
            return Self::message(400, "Missing required user data.");
        };

        let mut users = self.inner.users.borrow_mut();
        if users.iter().any(|u| u.username == new_user.username) {
            return Self::message(409, "Username already exists");
        }

        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        let user = User {
            uuid: format!("new-{}", id),
            username: new_user.username,
            role: new_user.role,
        };
        users.push(user.clone());
        HttpResponse::new(201, serde_json::to_string(&user).unwrap())
    }
}

#[async_trait(?Send)]
impl HttpClient for FakeServer {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.inner.requests.borrow_mut().push(req.clone());
        if let Some(hook) = self.inner.on_send.borrow().as_ref() {
            hook(&req);
        }

        if self.inner.offline.get() {
            return Err(ApiError::Network("Failed to fetch".to_string()));
        }

        let scripted = self
            .inner
            .scripted
            .borrow_mut()
            .get_mut(&req.method)
            .and_then(|q| q.pop_front());
        Ok(scripted.unwrap_or_else(|| self.route(&req)))
    }
}

// =========================================================
// MemoryTokenStore
// =========================================================

#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    value: Rc<RefCell<Option<String>>>,
    reads: Rc<Cell<u32>>,
    /// 模拟存储不可写（隐私模式、配额耗尽）
    locked: Rc<Cell<bool>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        *store.value.borrow_mut() = Some(token.to_string());
        store
    }

    pub fn set_locked(&self, locked: bool) {
        self.locked.set(locked);
    }

    pub fn stored(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.reads.set(self.reads.get() + 1);
        self.value.borrow().clone()
    }

    fn save(&self, token: &str) -> bool {
        if self.locked.get() {
            return false;
        }
        *self.value.borrow_mut() = Some(token.to_string());
        true
    }

    fn clear(&self) -> bool {
        if self.locked.get() {
            return false;
        }
        *self.value.borrow_mut() = None;
        true
    }
}

// =========================================================
// DisposableState
// =========================================================

/// 可以手动“卸载”的视图状态，卸载后所有读写都被丢弃
pub struct DisposableState<T> {
    value: Rc<RefCell<T>>,
    alive: Rc<Cell<bool>>,
}

impl<T> Clone for DisposableState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            alive: self.alive.clone(),
        }
    }
}

impl<T: Default> DisposableState<T> {
    pub fn new() -> Self {
        Self {
            value: Rc::new(RefCell::new(T::default())),
            alive: Rc::new(Cell::new(true)),
        }
    }
}

impl<T> DisposableState<T> {
    pub fn dispose(&self) {
        self.alive.set(false);
    }

    /// 绕过卸载标记直接查看内部值
    pub fn peek<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }
}

impl<T> ViewState<T> for DisposableState<T> {
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.alive.get().then(|| f(&self.value.borrow()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.alive.get().then(|| f(&mut self.value.borrow_mut()))
    }
}
