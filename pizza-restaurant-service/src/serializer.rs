use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PizzaBody {
    pub id: i32,
    pub name: String,
    /// Free-form ingredient description, e.g. "Tomato, Mozzarella"
    pub ingredients: String,
}

/// An association as it appears inside a restaurant's details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantPizzaBody {
    pub id: i32,
    pub restaurant_id: i32,
    pub restaurant: RestaurantSummary,
    pub pizza_id: i32,
    pub pizza: PizzaBody,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantDetails {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaBody>,
}

/// Body returned by `POST /restaurant_pizzas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RestaurantPizzaCreated {
    pub id: i32,
    pub price: f64,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaBody,
    pub restaurant: RestaurantSummary,
}

/// Documented shape of the creation request. The handler itself accepts any
/// JSON value and coerces fields leniently.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30, inclusive
    pub price: f64,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorsResponse {
    pub errors: Vec<String>,
}

pub fn serialize_restaurant(restaurant: &models::Restaurant) -> RestaurantSummary {
    RestaurantSummary {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
    }
}

pub fn serialize_pizza(pizza: &models::Pizza) -> PizzaBody {
    PizzaBody {
        id: pizza.id,
        name: pizza.name.clone(),
        ingredients: pizza.ingredients.clone(),
    }
}

pub fn serialize_restaurant_details(
    restaurant: &models::Restaurant,
    restaurant_pizzas: &[(models::RestaurantPizza, models::Pizza)],
) -> RestaurantDetails {
    RestaurantDetails {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
        restaurant_pizzas: restaurant_pizzas
            .iter()
            .map(|(rp, pizza)| RestaurantPizzaBody {
                id: rp.id,
                restaurant_id: rp.restaurant_id,
                restaurant: serialize_restaurant(restaurant),
                pizza_id: rp.pizza_id,
                pizza: serialize_pizza(pizza),
                price: rp.price,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_restaurant_details_nests_one_level() {
        let restaurant = models::Restaurant {
            id: 1,
            name: "Dough Bros".to_string(),
            address: "1 Main St".to_string(),
        };
        let pizza = models::Pizza {
            id: 2,
            name: "Margherita".to_string(),
            ingredients: "Tomato, Mozzarella".to_string(),
        };
        let rp = models::RestaurantPizza {
            id: 3,
            price: 12.5,
            pizza_id: 2,
            restaurant_id: 1,
        };

        let details = serialize_restaurant_details(&restaurant, &[(rp, pizza)]);

        assert_eq!(
            serde_json::to_value(details).unwrap(),
            json!({
                "id": 1,
                "name": "Dough Bros",
                "address": "1 Main St",
                "restaurant_pizzas": [{
                    "id": 3,
                    "restaurant_id": 1,
                    "restaurant": {"id": 1, "name": "Dough Bros", "address": "1 Main St"},
                    "pizza_id": 2,
                    "pizza": {"id": 2, "name": "Margherita", "ingredients": "Tomato, Mozzarella"},
                    "price": 12.5,
                }],
            })
        );
    }
}
