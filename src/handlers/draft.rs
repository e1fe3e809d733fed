use axum::extract::{Extension, State};
use serde::Serialize;

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::middleware::VendorContext;
use crate::models::LineItemForm;

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub draft: LineItemForm,
    pub updated_at: i64,
}

pub async fn save_draft(
    State(state): State<AppState>,
    Extension(ctx): Extension<VendorContext>,
    Json(form): Json<LineItemForm>,
) -> Result<Json<serde_json::Value>> {
    let payload = serde_json::to_string(&form)?;
    let conn = state.db.get()?;
    queries::upsert_draft(&conn, &ctx.vendor.id, &payload)?;
    Ok(Json(serde_json::json!({ "saved": true })))
}

pub async fn get_draft(
    State(state): State<AppState>,
    Extension(ctx): Extension<VendorContext>,
) -> Result<Json<DraftResponse>> {
    let conn = state.db.get()?;
    let draft = queries::get_draft(&conn, &ctx.vendor.id)?
        .ok_or_else(|| AppError::NotFound("No draft saved".into()))?;

    let form: LineItemForm = serde_json::from_str(&draft.payload)?;
    Ok(Json(DraftResponse {
        draft: form,
        updated_at: draft.updated_at,
    }))
}

pub async fn delete_draft(
    State(state): State<AppState>,
    Extension(ctx): Extension<VendorContext>,
) -> Result<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    let deleted = queries::delete_draft(&conn, &ctx.vendor.id)?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
