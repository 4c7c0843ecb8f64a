//! Users API handlers.
//!
//! ```text
//! POST  /api/v1/users     {"email":"ada@example.com","password":"s3cret!","name":"Ada"}
//! POST  /api/v1/token     {"email":"ada@example.com","password":"s3cret!"}
//! GET   /api/v1/users/me  Authorization: Token <token>
//! PATCH /api/v1/users/me  {"name":"Ada Lovelace"}
//! ```

use actix_web::{HttpResponse, Resource, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{ProfileUpdate, RegistrationRequest};
use crate::domain::{Error, LoginCredentials, User, login_validation_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::error::ALLOWED_METHODS_DETAIL;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Detail code reported when the token endpoint rejects credentials.
pub const INVALID_CREDENTIALS: &str = "invalid_credentials";

/// Methods accepted by `/users/me`.
pub const ME_ALLOWED_METHODS: [&str; 2] = ["GET", "PATCH"];

/// Request body for `POST /api/v1/users`.
///
/// Fields are optional at the transport level so missing values surface as
/// field validation errors instead of JSON decoding failures.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse")]
    pub password: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
}

impl From<CreateUserRequest> for RegistrationRequest {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            email: value.email,
            password: value.password,
            name: value.name,
        }
    }
}

/// Request body for `POST /api/v1/token`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse")]
    pub password: Option<String>,
}

/// Request body for `PATCH /api/v1/users/me`. Omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl From<UpdateUserRequest> for ProfileUpdate {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            email: value.email,
            password: value.password,
            name: value.name,
        }
    }
}

/// Public view of a user. Never carries credentials.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct UserResponse {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email().to_string(),
            name: user.name().to_string(),
        }
    }
}

/// Response body for a successful token request.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

fn invalid_credentials() -> Error {
    Error::invalid_request("unable to authenticate with provided credentials")
        .with_details(json!({ "code": INVALID_CREDENTIALS }))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request or email taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .registration
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange email and password for an API token.
#[utoipa::path(
    post,
    path = "/api/v1/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createToken",
    security([])
)]
#[post("/token")]
pub async fn create_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let TokenRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(
        email.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
    .map_err(login_validation_error)?;

    let Some(user) = state.login.authenticate(&credentials).await? else {
        debug!("token request rejected");
        return Err(invalid_credentials());
    };

    let token = state.tokens.issue_token(&user).await?;
    Ok(web::Json(TokenResponse {
        token: token.expose().to_owned(),
    }))
}

/// Return the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getCurrentUser"
)]
pub async fn get_me(
    state: web::Data<HttpState>,
    current: AuthenticatedUser,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.profile.fetch_profile(current.0.id()).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Update any subset of the authenticated user's email, password and name.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request or email taken", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser"
)]
pub async fn update_me(
    state: web::Data<HttpState>,
    current: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .profile_command
        .update_profile(current.0.id(), payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Reject every other method on `/users/me`, whatever the payload.
pub async fn me_method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed("method not allowed")
        .with_details(json!({ ALLOWED_METHODS_DETAIL: ME_ALLOWED_METHODS })))
}

/// Resource serving `/users/me`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use accounts::inbound::http::users::me_resource;
///
/// let app = App::new().service(web::scope("/api/v1").service(me_resource()));
/// ```
pub fn me_resource() -> Resource {
    web::resource("/users/me")
        .route(web::get().to(get_me))
        .route(web::patch().to(update_me))
        .default_service(web::to(me_method_not_allowed))
}
