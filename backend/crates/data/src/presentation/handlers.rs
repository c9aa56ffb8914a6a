//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::application::batch::BatchOutcome;
use crate::application::contract::{
    CreateManyParams, CreateParams, DataProvider, DataResponse, DeleteManyParams, DeleteOneParams,
    GetListResponse, GetManyParams, GetOneParams, UpdateManyParams, UpdateParams, Variables,
};
use crate::domain::entity::record::Record;
use crate::error::DataResult;
use crate::presentation::dto::{CreateManyRequest, IdsRequest, ListQuery, UpdateManyRequest};

/// Shared state for data handlers
pub struct DataAppState<P> {
    pub provider: Arc<P>,
}

impl<P> Clone for DataAppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

/// GET /api/data/{resource}
pub async fn get_list<P>(
    State(state): State<DataAppState<P>>,
    Path(resource): Path<String>,
    Query(query): Query<ListQuery>,
) -> DataResult<Json<GetListResponse>>
where
    P: DataProvider + Sync + 'static,
{
    let params = query.into_params(resource)?;
    Ok(Json(state.provider.get_list(params).await?))
}

/// POST /api/data/{resource}
pub async fn create<P>(
    State(state): State<DataAppState<P>>,
    Path(resource): Path<String>,
    Json(variables): Json<Variables>,
) -> DataResult<Json<DataResponse<Record>>>
where
    P: DataProvider + Sync + 'static,
{
    let params = CreateParams {
        resource,
        variables,
    };
    Ok(Json(state.provider.create(params).await?))
}

/// GET /api/data/{resource}/{id}
pub async fn get_one<P>(
    State(state): State<DataAppState<P>>,
    Path((resource, id)): Path<(String, String)>,
) -> DataResult<Json<DataResponse<Record>>>
where
    P: DataProvider + Sync + 'static,
{
    Ok(Json(state.provider.get_one(GetOneParams { resource, id }).await?))
}

/// PATCH /api/data/{resource}/{id}
pub async fn update<P>(
    State(state): State<DataAppState<P>>,
    Path((resource, id)): Path<(String, String)>,
    Json(variables): Json<Variables>,
) -> DataResult<Json<DataResponse<Record>>>
where
    P: DataProvider + Sync + 'static,
{
    let params = UpdateParams {
        resource,
        id,
        variables,
    };
    Ok(Json(state.provider.update(params).await?))
}

/// DELETE /api/data/{resource}/{id}
pub async fn delete_one<P>(
    State(state): State<DataAppState<P>>,
    Path((resource, id)): Path<(String, String)>,
) -> DataResult<Json<DataResponse<Record>>>
where
    P: DataProvider + Sync + 'static,
{
    Ok(Json(
        state
            .provider
            .delete_one(DeleteOneParams { resource, id })
            .await?,
    ))
}

/// POST /api/data/{resource}/batch/get
pub async fn get_many<P>(
    State(state): State<DataAppState<P>>,
    Path(resource): Path<String>,
    Json(req): Json<IdsRequest>,
) -> DataResult<Json<DataResponse<Vec<Record>>>>
where
    P: DataProvider + Sync + 'static,
{
    let params = GetManyParams {
        resource,
        ids: req.ids,
    };
    Ok(Json(state.provider.get_many(params).await?))
}

/// POST /api/data/{resource}/batch
pub async fn create_many<P>(
    State(state): State<DataAppState<P>>,
    Path(resource): Path<String>,
    Json(req): Json<CreateManyRequest>,
) -> DataResult<Json<BatchOutcome<Record>>>
where
    P: DataProvider + Sync + 'static,
{
    let params = CreateManyParams {
        resource,
        variables: req.variables,
    };
    Ok(Json(state.provider.create_many(params).await?))
}

/// PATCH /api/data/{resource}/batch
pub async fn update_many<P>(
    State(state): State<DataAppState<P>>,
    Path(resource): Path<String>,
    Json(req): Json<UpdateManyRequest>,
) -> DataResult<Json<BatchOutcome<Record>>>
where
    P: DataProvider + Sync + 'static,
{
    let params = UpdateManyParams {
        resource,
        ids: req.ids,
        variables: req.variables,
    };
    Ok(Json(state.provider.update_many(params).await?))
}

/// DELETE /api/data/{resource}/batch
pub async fn delete_many<P>(
    State(state): State<DataAppState<P>>,
    Path(resource): Path<String>,
    Json(req): Json<IdsRequest>,
) -> DataResult<Json<BatchOutcome<String>>>
where
    P: DataProvider + Sync + 'static,
{
    let params = DeleteManyParams {
        resource,
        ids: req.ids,
    };
    Ok(Json(state.provider.delete_many(params).await?))
}
