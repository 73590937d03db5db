use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::Role;

#[derive(serde::Serialize, Default)]
pub struct Empty;

type GuardResult = Result<Response, (StatusCode, Json<ApiResponse<Empty>>)>;

/// Helper to extract and validate the user, then insert it back into the request extensions.
async fn extract_and_insert_authuser(
    req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

/// Base role guard the others build upon.
///
/// Missing or invalid tokens yield `401`; a valid token whose role is not in
/// `allowed` yields `403` with `failure_msg`.
async fn allow_roles(
    req: Request<Body>,
    next: Next,
    allowed: &[Role],
    failure_msg: &str,
) -> GuardResult {
    let (req, user) = extract_and_insert_authuser(req).await?;

    if !allowed.contains(&user.0.role) {
        tracing::warn!(
            user_id = user.0.sub,
            role = %user.0.role,
            path = %req.uri().path(),
            "Role not permitted for route"
        );
        return Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))));
    }

    Ok(next.run(req).await)
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> GuardResult {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Student-only guard.
pub async fn allow_student(req: Request<Body>, next: Next) -> GuardResult {
    allow_roles(req, next, &[Role::Student], "Student access required").await
}

/// Teacher guard; administrators pass as well.
pub async fn allow_teacher(req: Request<Body>, next: Next) -> GuardResult {
    allow_roles(
        req,
        next,
        &[Role::Teacher, Role::Admin],
        "Teacher access required",
    )
    .await
}

/// Guard for routes only meaningful to students and teachers (e.g. own defense schedule).
pub async fn allow_student_or_teacher(req: Request<Body>, next: Next) -> GuardResult {
    allow_roles(
        req,
        next,
        &[Role::Student, Role::Teacher],
        "Student or teacher access required",
    )
    .await
}

/// Admin-only guard.
pub async fn allow_admin(req: Request<Body>, next: Next) -> GuardResult {
    allow_roles(req, next, &[Role::Admin], "Admin access required").await
}
