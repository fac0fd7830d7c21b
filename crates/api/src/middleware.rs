use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use homeshare_core::MemberId;

use crate::context::MemberContext;

/// Header carrying the authenticated member id, set by the upstream authenticator.
pub const MEMBER_HEADER: &str = "x-member-id";

pub async fn member_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let member_id = extract_member(req.headers())?;
    req.extensions_mut().insert(MemberContext::new(member_id));
    Ok(next.run(req).await)
}

fn extract_member(headers: &HeaderMap) -> Result<MemberId, StatusCode> {
    let header = headers.get(MEMBER_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;
    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;
    MemberId::parse(header).map_err(|_| StatusCode::UNAUTHORIZED)
}
