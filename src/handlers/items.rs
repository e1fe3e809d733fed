use axum::extract::{Extension, State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use tracing::{error, warn};

use crate::db::{AppState, queries};
use crate::error::{AppError, Result};
use crate::extractors::{Json, Path};
use crate::intake::validate::{UniquenessOutcome, ValidationReport};
use crate::intake::{fanout, resolve, validate};
use crate::middleware::VendorContext;
use crate::models::{DeviceRow, LineItemForm};
use crate::upstream::MarketItem;

const MAX_QUANTITY: u32 = 10_000;
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub item: MarketItem,
    /// Non-blocking notes, e.g. when the uniqueness pre-check was skipped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<VendorContext>,
    Json(form): Json<LineItemForm>,
) -> Result<Json<SubmitResponse>> {
    submit(&state, &ctx, form, None).await
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(ctx): Extension<VendorContext>,
    Path(id): Path<String>,
    Json(form): Json<LineItemForm>,
) -> Result<Json<SubmitResponse>> {
    submit(&state, &ctx, form, Some(&id)).await
}

/// Load a persisted item and return it in the editable form shape, flat
/// arrays re-hydrated into per-device rows.
pub async fn get_item(
    State(state): State<AppState>,
    Extension(_ctx): Extension<VendorContext>,
    Path(id): Path<String>,
) -> Result<Json<LineItemForm>> {
    let item = state.market.get_item(&id).await?;
    Ok(Json(fanout::form_from_item(item)))
}

/// Dry-run validation: run every check, including the advisory remote one,
/// and return the report without submitting anything.
pub async fn check_item(
    State(state): State<AppState>,
    Extension(_ctx): Extension<VendorContext>,
    Json(form): Json<LineItemForm>,
) -> Result<Json<ValidationReport>> {
    if !form.category.unit_tracked() {
        return Ok(Json(ValidationReport::clean(false)));
    }

    let rows = sized_rows(&form)?;
    if let Err(issue) = validate::check_local(&rows, form.quantity as usize) {
        return Ok(Json(ValidationReport::failed(vec![issue], false)));
    }

    let identifiers: Vec<String> = rows.iter().map(|r| r.identifier.clone()).collect();
    if identifiers.is_empty() {
        return Ok(Json(ValidationReport::clean(false)));
    }

    match state.market.check_identifiers(&identifiers).await {
        UniquenessOutcome::Unreachable => Ok(Json(ValidationReport::clean(false))),
        UniquenessOutcome::Verified(report) => {
            let issues = validate::remote_issues(report);
            Ok(Json(ValidationReport::failed(issues, true)))
        }
    }
}

async fn submit(
    state: &AppState,
    ctx: &VendorContext,
    form: LineItemForm,
    existing_id: Option<&str>,
) -> Result<Json<SubmitResponse>> {
    let rows = sized_rows(&form)?;

    // Local checks are cheap and run before any network round trip.
    if form.category.unit_tracked()
        && let Err(issue) = validate::check_local(&rows, form.quantity as usize)
    {
        return Err(AppError::Validation(ValidationReport::failed(
            vec![issue],
            false,
        )));
    }

    // The upstream pipeline is strictly sequential: images, then the
    // uniqueness pre-check, then persistence.
    let mut images = form.existing_images.clone();
    if !form.images.is_empty() {
        check_image_uploads(&form)?;
        match state.market.register_images(&form.images).await {
            Ok(hosted) => images.extend(hosted),
            Err(err) => return Err(stash_draft_and_return(state, ctx, &form, err)),
        }
    }

    let mut warnings = Vec::new();
    if form.category.unit_tracked() {
        let identifiers: Vec<String> = rows.iter().map(|r| r.identifier.clone()).collect();
        if !identifiers.is_empty() {
            match state.market.check_identifiers(&identifiers).await {
                UniquenessOutcome::Unreachable => {
                    warn!(vendor = %ctx.vendor.id, "uniqueness pre-check unreachable, proceeding");
                    warnings.push(
                        "Identifier uniqueness could not be verified; submission accepted"
                            .to_string(),
                    );
                }
                UniquenessOutcome::Verified(report) => {
                    let issues = validate::remote_issues(report);
                    if !issues.is_empty() {
                        return Err(AppError::Validation(ValidationReport::failed(issues, true)));
                    }
                }
            }
        }
    }

    let payload = resolve::build_payload(&form, &rows, images);
    let result = match existing_id {
        Some(id) => state.market.update_item(id, &payload).await,
        None => state.market.create_item(&payload).await,
    };

    match result {
        Ok(item) => {
            // The entered data is persisted upstream now; a stale draft
            // would only resurrect it.
            clear_draft(state, &ctx.vendor.id);
            Ok(Json(SubmitResponse { item, warnings }))
        }
        Err(err) => Err(stash_draft_and_return(state, ctx, &form, err)),
    }
}

/// Clone the entered rows and size them to the quantity.
fn sized_rows(form: &LineItemForm) -> Result<Vec<DeviceRow>> {
    if form.quantity > MAX_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "Quantity exceeds the maximum of {}",
            MAX_QUANTITY
        )));
    }
    let mut rows = form.devices.clone();
    fanout::resize(&mut rows, form.quantity as usize);
    Ok(rows)
}

fn check_image_uploads(form: &LineItemForm) -> Result<()> {
    for upload in &form.images {
        let bytes = BASE64.decode(&upload.content).map_err(|_| {
            AppError::BadRequest(format!("Image '{}' is not valid base64", upload.filename))
        })?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest(format!(
                "Image '{}' exceeds the {} MB limit",
                upload.filename,
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }
    }
    Ok(())
}

/// On an upstream transport failure the entered line item survives as the
/// vendor's draft so nothing has to be re-typed. Best-effort: a draft write
/// failure is logged and never masks the original error.
fn stash_draft_and_return(
    state: &AppState,
    ctx: &VendorContext,
    form: &LineItemForm,
    err: AppError,
) -> AppError {
    if !matches!(err, AppError::Upstream(_)) {
        return err;
    }

    let stash = || -> Result<()> {
        let payload = serde_json::to_string(form)?;
        let conn = state.db.get()?;
        queries::upsert_draft(&conn, &ctx.vendor.id, &payload)
    };
    if let Err(stash_err) = stash() {
        error!(vendor = %ctx.vendor.id, error = %stash_err, "failed to stash draft after upstream failure");
    }

    err
}

fn clear_draft(state: &AppState, vendor_id: &str) {
    let clear = || -> Result<bool> {
        let conn = state.db.get()?;
        queries::delete_draft(&conn, vendor_id)
    };
    if let Err(err) = clear() {
        warn!(vendor = %vendor_id, error = %err, "failed to clear draft after submission");
    }
}
