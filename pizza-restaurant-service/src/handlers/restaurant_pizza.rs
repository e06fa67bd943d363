use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::serializer::*;
use crate::service::AssociationError;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaCreated),
        (status = 400, description = "Malformed or invalid input", body = ApiErrorsResponse),
        (status = 404, description = "Pizza or Restaurant not found", body = ApiErrorsResponse),
        (status = 500, description = "Internal server error", body = ApiErrorsResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip_all)]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaCreated>), AssociationError> {
    let Json(input) = payload.map_err(|rejection| {
        warn!(error = %rejection, "unreadable restaurant pizza body");
        AssociationError::MalformedInput
    })?;

    let created = state.association_service.create(&input).await?;

    Ok((StatusCode::CREATED, Json(created)))
}
