use axum::{extract::State, response::Json, routing::get, Router};
use tracing::instrument;

use crate::error::ApiError;
use crate::serializer::{serialize_pizza, ApiErrorResponse, PizzaBody};
use crate::store::PizzaStore;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas", body = [PizzaBody]),
        (status = 500, description = "Internal server error", body = ApiErrorResponse),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<PizzaBody>>, ApiError> {
    let pizzas = state
        .db
        .run(|conn| PizzaStore::new(conn).list_pizzas().map_err(ApiError::from))
        .await?;

    Ok(Json(pizzas.iter().map(serialize_pizza).collect()))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::handlers::app;
    use crate::testing::{seed_dough_bros, test_database};

    #[tokio::test]
    async fn test_list_pizzas() {
        let (_dir, db) = test_database();
        let (_, pizza) = seed_dough_bros(&mut db.establish().unwrap());
        let response = app(AppState::new(db))
            .oneshot(Request::builder().uri("/pizzas").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!([{
                "id": pizza.id,
                "name": "Margherita",
                "ingredients": "Tomato, Mozzarella",
            }])
        );
    }

    #[tokio::test]
    async fn test_list_pizzas_empty() {
        let (_dir, db) = test_database();
        let response = app(AppState::new(db))
            .oneshot(Request::builder().uri("/pizzas").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!([]));
    }
}
