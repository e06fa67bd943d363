use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::serializer::*;
use crate::store::PizzaStore;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = [RestaurantSummary]),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let restaurants = state
        .db
        .run(|conn| {
            PizzaStore::new(conn)
                .list_restaurants()
                .map_err(ApiError::from)
        })
        .await?;

    Ok(Json(restaurants.iter().map(serialize_restaurant).collect()))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant details", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RestaurantDetails>, ApiError> {
    let details = state
        .db
        .run(move |conn| -> Result<RestaurantDetails, ApiError> {
            let mut store = PizzaStore::new(conn);
            let restaurant = store
                .find_restaurant(id)?
                .ok_or(ApiError::RestaurantNotFound)?;
            let restaurant_pizzas = store.restaurant_pizzas_of(&restaurant)?;
            Ok(serialize_restaurant_details(&restaurant, &restaurant_pizzas))
        })
        .await?;

    Ok(Json(details))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizza offerings deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .db
        .run(move |conn| {
            conn.immediate_transaction::<_, ApiError, _>(|conn| {
                if PizzaStore::new(conn).delete_restaurant(id)? {
                    Ok(())
                } else {
                    Err(ApiError::RestaurantNotFound)
                }
            })
        })
        .await?;

    info!(id, "deleted restaurant");
    Ok(StatusCode::NO_CONTENT)
}
