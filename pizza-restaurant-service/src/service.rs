use serde_json::{Map, Value};
use tracing::info;

use crate::models::{validate_price, NewRestaurantPizza, ValidationError};
use crate::serializer::{serialize_pizza, serialize_restaurant, RestaurantPizzaCreated};
use crate::store::{Database, PizzaStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum AssociationError {
    #[error("Malformed request body")]
    MalformedInput,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Pizza or Restaurant not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] StoreError),
}

impl From<diesel::result::Error> for AssociationError {
    fn from(e: diesel::result::Error) -> Self {
        AssociationError::Internal(StoreError::Query(e))
    }
}

/// Creation input after coercion, presence and range checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssociationInput {
    pub price: f64,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

impl AssociationInput {
    /// Accepts a JSON object with `price`, `pizza_id` and `restaurant_id`.
    ///
    /// Numbers may arrive as JSON numbers or numeric strings; ids given as
    /// floats must have no fractional part. Missing, `null` and zero values are
    /// all treated as absent.
    pub fn parse(input: &Value) -> Result<Self, AssociationError> {
        let fields = input.as_object().ok_or(AssociationError::MalformedInput)?;

        let price = field(fields, "price").map(coerce_price).transpose()?;
        let pizza_id = field(fields, "pizza_id").map(coerce_id).transpose()?;
        let restaurant_id = field(fields, "restaurant_id").map(coerce_id).transpose()?;

        match (price, pizza_id, restaurant_id) {
            (Some(price), Some(pizza_id), Some(restaurant_id))
                if price != 0.0 && pizza_id != 0 && restaurant_id != 0 =>
            {
                Ok(Self {
                    price: validate_price(price)?,
                    pizza_id,
                    restaurant_id,
                })
            }
            _ => Err(ValidationError::InvalidField.into()),
        }
    }
}

fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|value| !value.is_null())
}

fn coerce_price(value: &Value) -> Result<f64, ValidationError> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or(ValidationError::InvalidField)
}

fn coerce_id(value: &Value) -> Result<i32, ValidationError> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|id| id.is_finite() && id.fract() == 0.0)
                .map(|id| id as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .and_then(|id| i32::try_from(id).ok())
    .ok_or(ValidationError::InvalidField)
}

#[derive(Debug, Clone)]
pub struct AssociationService {
    db: Database,
}

impl AssociationService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Validates `input` and stores a new restaurant pizza. Each call inserts a
    /// new row; identical inputs are not deduplicated.
    pub async fn create(&self, input: &Value) -> Result<RestaurantPizzaCreated, AssociationError> {
        let input = AssociationInput::parse(input)?;

        let created = self
            .db
            .run(move |conn| {
                conn.immediate_transaction::<_, AssociationError, _>(|conn| {
                    let mut store = PizzaStore::new(conn);
                    let pizza = store.find_pizza(input.pizza_id)?;
                    let restaurant = store.find_restaurant(input.restaurant_id)?;
                    let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
                        return Err(AssociationError::NotFound);
                    };

                    let new = NewRestaurantPizza::new(input.price, &pizza, &restaurant)?;
                    let restaurant_pizza = store.insert_restaurant_pizza(&new)?;

                    Ok(RestaurantPizzaCreated {
                        id: restaurant_pizza.id,
                        price: restaurant_pizza.price,
                        pizza_id: input.pizza_id,
                        restaurant_id: input.restaurant_id,
                        pizza: serialize_pizza(&pizza),
                        restaurant: serialize_restaurant(&restaurant),
                    })
                })
            })
            .await?;

        info!(
            id = created.id,
            pizza_id = created.pizza_id,
            restaurant_id = created.restaurant_id,
            "created restaurant pizza"
        );
        Ok(created)
    }
}
