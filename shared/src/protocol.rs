use crate::{Role, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response;
    /// The URL path (or prefix, see [`ApiRequest::path`]).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request carries the bearer token.
    const AUTHENTICATED: bool = true;
    /// Whether the request is sent with a JSON body.
    const HAS_BODY: bool = false;

    /// Concrete path for this request. Parameterised endpoints override it.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }

    /// Decode a successful response body.
    fn parse_response(body: &str) -> Result<Self::Response, serde_json::Error>;
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(body)
}

/// Error body shape for non-2xx responses: `{ "message": "..." }`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// Request Definitions
// =========================================================

/// Authenticate with username/password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Raw role string; anything other than "admin" lands on the account page.
    pub role: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/api/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
    const HAS_BODY: bool = true;

    fn parse_response(body: &str) -> Result<Self::Response, serde_json::Error> {
        parse_json(body)
    }
}

/// List all users
#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Vec<User>;
    const PATH: &'static str = "/api/users";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn parse_response(body: &str) -> Result<Self::Response, serde_json::Error> {
        parse_json(body)
    }
}

/// Create a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl ApiRequest for CreateUserRequest {
    // The created record is re-read through a full listing, so the body is ignored.
    type Response = ();
    const PATH: &'static str = "/api/users";
    const METHOD: HttpMethod = HttpMethod::Post;
    const HAS_BODY: bool = true;

    fn parse_response(_body: &str) -> Result<Self::Response, serde_json::Error> {
        Ok(())
    }
}

/// Delete a user by uuid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub uuid: String,
}

impl ApiRequest for DeleteUserRequest {
    type Response = ();
    const PATH: &'static str = "/api/users";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.uuid)
    }

    fn parse_response(_body: &str) -> Result<Self::Response, serde_json::Error> {
        Ok(())
    }
}
