//! Data Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::contract::DataProvider;
use crate::presentation::handlers::{self, DataAppState};

/// Create the Data router for any provider implementation
pub fn data_router<P>(provider: P) -> Router
where
    P: DataProvider + Sync + 'static,
{
    data_router_shared(Arc::new(provider))
}

/// Create the Data router around an already shared provider
pub fn data_router_shared<P>(provider: Arc<P>) -> Router
where
    P: DataProvider + Sync + 'static,
{
    let state = DataAppState { provider };

    Router::new()
        .route(
            "/{resource}",
            get(handlers::get_list::<P>).post(handlers::create::<P>),
        )
        .route(
            "/{resource}/batch",
            post(handlers::create_many::<P>)
                .patch(handlers::update_many::<P>)
                .delete(handlers::delete_many::<P>),
        )
        .route("/{resource}/batch/get", post(handlers::get_many::<P>))
        .route(
            "/{resource}/{id}",
            get(handlers::get_one::<P>)
                .patch(handlers::update::<P>)
                .delete(handlers::delete_one::<P>),
        )
        .with_state(state)
}
