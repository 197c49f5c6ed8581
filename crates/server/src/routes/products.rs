//! Product route handlers.
//!
//! The listing and detail endpoints derive `imagen_url` differently: the
//! listing always falls back to the placeholder image, the detail view falls
//! back to `null`. Clients depend on both behaviors.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use mercado_core::{
    CatalogProduct, CreatedBody, MessageBody, NewProduct, ProductId, ProductPatch,
};

use crate::db::ProductRepository;
use crate::error::{AppError, NOT_FOUND_MESSAGE, Result};
use crate::state::AppState;

/// List all products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CatalogProduct>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(
        products
            .into_iter()
            .map(CatalogProduct::for_listing)
            .collect(),
    ))
}

/// Show a single product, or `null` if there is none with this ID.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Option<CatalogProduct>>> {
    let Ok(id) = raw_id.parse::<ProductId>() else {
        return Ok(Json(None));
    };

    let product = ProductRepository::new(state.pool()).get_by_id(id).await?;
    Ok(Json(product.map(CatalogProduct::for_detail)))
}

/// Create a product.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedBody>)> {
    let Json(input) = payload?;
    let draft = input.validate()?;

    let id = ProductRepository::new(state.pool()).create(&draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedBody {
            message: "Producto creado".to_string(),
            id,
        }),
    ))
}

/// Partially update a product.
///
/// An update without fields is rejected before the ID is looked at.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: std::result::Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<MessageBody>> {
    let Json(patch) = payload?;
    patch.validate()?;

    let id = raw_id
        .parse::<ProductId>()
        .map_err(|_| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    ProductRepository::new(state.pool()).update(id, &patch).await?;

    Ok(Json(MessageBody {
        message: "Producto actualizado".to_string(),
    }))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageBody>> {
    let id = raw_id
        .parse::<ProductId>()
        .map_err(|_| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    ProductRepository::new(state.pool()).delete(id).await?;

    Ok(Json(MessageBody {
        message: "Producto eliminado".to_string(),
    }))
}
