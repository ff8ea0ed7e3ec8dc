use crate::auth::{CurrentUser, MaybeUser};
use crate::error::{ApiError, Result};
use crate::model::{CreateLinkResponse, SuccessResponse};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use splash_core::{LinkEntry, LinkId, StoreError};
use std::collections::BTreeMap;
use tracing::info;

/// Parsed fields of the create form.
#[derive(Default)]
struct CreateForm {
    id: Option<String>,
    url_mobile: Option<String>,
    url_desktop: String,
    image: Option<(String, Bytes)>,
}

/// `POST /api/create` — multipart form with `id`, `urlMobile`,
/// optional `urlDesktop`, and an `image` file.
///
/// The upload is written to the asset store first so the entry can
/// reference it; if the insert is then rejected the file is removed
/// again rather than left orphaned.
pub async fn create_link_handler(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreateLinkResponse>)> {
    let form = read_create_form(multipart).await?;
    let (Some(id), Some(url_mobile), Some((file_name, bytes))) =
        (form.id, form.url_mobile, form.image)
    else {
        return Err(ApiError::InvalidForm("Invalid form submission".to_string()));
    };

    let id = LinkId::new(id)?;
    let image = state.assets.store(&id, &file_name, &bytes).await?;
    let entry = LinkEntry::new(&id, &image, url_mobile, form.url_desktop);

    if let Err(err) = state.links.create(&username, entry).await {
        state.assets.remove(&image).await;
        return Err(err.into());
    }
    info!(user = %username, id = %id, "created link");

    // Short URL is derived from the caller's origin, matching the old
    // server's behavior of echoing back `{origin}/{id}`.
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            link: format!("{origin}/{id}"),
        }),
    ))
}

/// `GET /api/links` — the caller's entries, keyed by id.
pub async fn list_links_handler(
    State(state): State<AppState>,
    CurrentUser(username): CurrentUser,
) -> Result<Json<BTreeMap<String, LinkEntry>>> {
    let entries = state.links.list(&username).await?;
    let map = entries
        .into_iter()
        .map(|entry| (entry.id.clone(), entry))
        .collect();
    Ok(Json(map))
}

/// `GET /api/link/{id}` — public resolution endpoint, no session
/// required. The presentation layer picks a destination URL from the
/// returned entry based on the visitor's user agent.
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkEntry>> {
    let entry = state
        .links
        .lookup(&id)
        .await?
        .ok_or(StoreError::NotFound(id))?;
    Ok(Json(entry))
}

/// `DELETE /api/delete/{id}` — the session is optional here because
/// legacy flat documents allow unauthenticated deletes; the store
/// decides whether one is required.
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    MaybeUser(username): MaybeUser,
) -> Result<Json<SuccessResponse>> {
    state.links.delete(username.as_ref(), &id).await?;
    info!(id = %id, "deleted link");
    Ok(Json(SuccessResponse::ok()))
}

async fn read_create_form(mut multipart: Multipart) -> Result<CreateForm> {
    let mut form = CreateForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::InvalidForm(err.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "id" => form.id = Some(read_text(field).await?),
            "urlMobile" => form.url_mobile = Some(read_text(field).await?),
            "urlDesktop" => form.url_desktop = read_text(field).await?,
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::InvalidForm(err.to_string()))?;
                form.image = Some((file_name, bytes));
            }
            _ => {}
        }
    }
    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|err| ApiError::InvalidForm(err.to_string()))
}
