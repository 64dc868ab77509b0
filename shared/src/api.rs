use crate::error::{ApiError, ApiResult};
use crate::protocol::{
    ApiRequest, CreateUserRequest, DeleteUserRequest, ErrorBody, ListUsersRequest, LoginRequest,
    LoginResponse,
};
use crate::request::{HttpClient, HttpRequest};
use crate::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, User, bearer};

/// UserDesk API 客户端
///
/// 这里接受任何实现了 HttpClient 的客户端，从而解耦了具体的 HTTP 实现：
/// 浏览器里是 fetch，测试里是内存中的假服务端。
#[derive(Clone, Debug, PartialEq)]
pub struct UserDeskApi<C> {
    client: C,
    base_url: String,
    token: Option<String>,
}

impl<C: HttpClient> UserDeskApi<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// 携带 Bearer 令牌的副本
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送描述符定义的请求并解码响应
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let mut http = HttpRequest::new(&self.url(&req.path()), R::METHOD);

        if R::AUTHENTICATED {
            let token = self.token.as_deref().ok_or(ApiError::Unauthenticated)?;
            http = http.with_header(HEADER_AUTHORIZATION, &bearer(token));
        }

        if R::HAS_BODY {
            let body = serde_json::to_string(req).map_err(|e| ApiError::Request(e.to_string()))?;
            http = http
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(body);
        }

        let resp = self.client.send(http).await?;

        if !resp.ok() {
            // 错误响应体可能不是 JSON，解析失败时只保留状态码
            let message = resp.json::<ErrorBody>().ok().and_then(|b| b.message);
            log::warn!(
                "[Api] {} {} failed with status {}",
                R::METHOD.as_str(),
                req.path(),
                resp.status
            );
            return Err(ApiError::Status {
                status: resp.status,
                message,
            });
        }

        R::parse_response(&resp.body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    pub async fn login(&self, username: String, password: String) -> ApiResult<LoginResponse> {
        self.call(&LoginRequest { username, password }).await
    }

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.call(&ListUsersRequest).await
    }

    pub async fn create_user(&self, req: &CreateUserRequest) -> ApiResult<()> {
        self.call(req).await
    }

    pub async fn delete_user(&self, uuid: &str) -> ApiResult<()> {
        self.call(&DeleteUserRequest {
            uuid: uuid.to_string(),
        })
        .await
    }
}
