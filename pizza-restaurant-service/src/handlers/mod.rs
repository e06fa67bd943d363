pub mod health;
pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

pub use pizza::router as pizza_router;
pub use restaurant::router as restaurant_router;
pub use restaurant_pizza::router as restaurant_pizza_router;

use axum::{response::Json, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::service::AssociationService;
use crate::store::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub association_service: AssociationService,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            association_service: AssociationService::new(db.clone()),
            db,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(restaurant_router())
        .merge(pizza_router())
        .merge(restaurant_pizza_router())
        .route("/api-docs/openapi.json", get(openapi))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::serializer::RestaurantSummary,
            crate::serializer::RestaurantDetails,
            crate::serializer::RestaurantPizzaBody,
            crate::serializer::PizzaBody,
            crate::serializer::CreateRestaurantPizzaRequest,
            crate::serializer::RestaurantPizzaCreated,
            crate::serializer::ApiErrorResponse,
            crate::serializer::ApiErrorsResponse,
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Restaurant pizza offerings"),
        (name = "health", description = "Liveness check")
    ),
    info(
        title = "Pizza Restaurant Service",
        description = "Restaurants, pizzas and the prices restaurants sell them at",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::testing::test_database;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let (_dir, db) = test_database();
        let response = app(AppState::new(db))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let (status, body) = get_json("/api-docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        for path in [
            "/restaurants",
            "/restaurants/{id}",
            "/pizzas",
            "/restaurant_pizzas",
        ] {
            assert!(body["paths"].get(path).is_some(), "missing {path}");
        }
    }
}
