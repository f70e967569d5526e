//! HTTP handlers for record collections
//!
//! The handlers are generic over the record type and shared by every
//! registered collection. List requests run the stored snapshot through
//! [`ListView::apply`].

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::CollectionSettings;
use crate::core::error::{AccessError, RecordError};
use crate::core::{
    LabdeskError, ListParams, ListView, PageResponse, Record, RecordService, Viewer,
};
use crate::records::NewRecord;

/// State shared by the handlers of one collection
pub struct CollectionState<T> {
    pub service: Arc<dyn RecordService<T>>,
    pub settings: Arc<CollectionSettings>,
}

impl<T> Clone for CollectionState<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            settings: self.settings.clone(),
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, LabdeskError> {
    Uuid::parse_str(raw).map_err(|_| {
        LabdeskError::from(RecordError::InvalidId {
            id: raw.to_string(),
        })
    })
}

fn not_found<T: Record>(id: Uuid) -> LabdeskError {
    RecordError::NotFound {
        collection: T::resource_name().to_string(),
        id,
    }
    .into()
}

/// List records with search, sort and pagination
///
/// GET /{collection}?page=0&size=10&q=&column=all&order=desc&category=
pub async fn list_records<T>(
    State(state): State<CollectionState<T>>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse<T>>, LabdeskError>
where
    T: Record + Serialize,
{
    let settings = &state.settings;
    let size = params.size(settings.default_page_size, settings.max_page_size);
    let query = params.list_query(settings.default_order);

    tracing::debug!(
        collection = T::resource_name(),
        page = params.page,
        size,
        q = %query.text,
        column = query.column.as_str(),
        order = %query.direction,
        "listing records"
    );

    let records = state.service.list().await?;
    let page = ListView::apply(records, &query, params.category(), params.page, size);

    Ok(Json(page))
}

/// Get one record
///
/// GET /{collection}/{id}
pub async fn get_record<T>(
    State(state): State<CollectionState<T>>,
    Path(id): Path<String>,
) -> Result<Json<T>, LabdeskError>
where
    T: Record + Serialize,
{
    let id = parse_id(&id)?;
    let record = state.service.get(&id).await?.ok_or_else(|| not_found::<T>(id))?;
    Ok(Json(record))
}

/// Create a record from a validated payload
///
/// POST /{collection}
pub async fn create_record<P>(
    State(state): State<CollectionState<P::Record>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, LabdeskError>
where
    P: NewRecord,
    P::Record: Serialize,
{
    let payload: P = serde_json::from_value(body).map_err(|e| LabdeskError::Validation {
        message: e.to_string(),
        fields: None,
    })?;

    let viewer = Viewer::from_headers(&headers);
    let record = payload.validated(&viewer)?;
    let created = state.service.create(record).await?;

    tracing::debug!(
        collection = <P::Record as Record>::resource_name(),
        id = %created.key(),
        "record created"
    );

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// Delete a record if the viewer is allowed to
///
/// DELETE /{collection}/{id}
pub async fn delete_record<T>(
    State(state): State<CollectionState<T>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, LabdeskError>
where
    T: Record,
{
    let id = parse_id(&id)?;
    let record = state.service.get(&id).await?.ok_or_else(|| not_found::<T>(id))?;

    let viewer = Viewer::from_headers(&headers);
    if !state.settings.delete_policy.allows(&viewer, record.owner_id()) {
        let message = format!("may not delete {} record {}", T::resource_name(), id);
        return Err(if viewer.is_authenticated() {
            AccessError::Forbidden { message }.into()
        } else {
            AccessError::Unauthorized { message }.into()
        });
    }

    state.service.delete(&id).await?.ok_or_else(|| not_found::<T>(id))?;

    tracing::debug!(collection = T::resource_name(), %id, "record deleted");

    Ok(StatusCode::NO_CONTENT)
}
