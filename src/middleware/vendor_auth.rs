use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::db::{AppState, queries};
use crate::models::Vendor;
use crate::util::{extract_bearer_token, hash_api_key};

#[derive(Clone)]
pub struct VendorContext {
    pub vendor: Vendor,
}

pub async fn vendor_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let api_key = extract_bearer_token(request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    // The connection goes back to the pool before the handler runs.
    let vendor = {
        let conn = state
            .db
            .get()
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        queries::get_vendor_by_key_hash(&conn, &hash_api_key(api_key))
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?
    };

    request.extensions_mut().insert(VendorContext { vendor });

    Ok(next.run(request).await)
}
