use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const MIN_PRICE: f64 = 1.0;
pub const MAX_PRICE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A field was missing, zero, or could not be coerced to its type.
    #[error("validation errors")]
    InvalidField,
    #[error("Price must be between 1 and 30.")]
    PriceOutOfRange,
}

/// Checks that `price` lies in `[MIN_PRICE, MAX_PRICE]`. NaN is rejected.
pub fn validate_price(price: f64) -> Result<f64, ValidationError> {
    if (MIN_PRICE..=MAX_PRICE).contains(&price) {
        Ok(price)
    } else {
        Err(ValidationError::PriceOutOfRange)
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant<'a> {
    pub name: &'a str,
    pub address: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza<'a> {
    pub name: &'a str,
    pub ingredients: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: f64,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

/// A not-yet-persisted association. Only obtainable through [`NewRestaurantPizza::new`],
/// so every insert carries a price inside the allowed range.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: f64,
    pizza_id: i32,
    restaurant_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(
        price: f64,
        pizza: &Pizza,
        restaurant: &Restaurant,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            price: validate_price(price)?,
            pizza_id: pizza.id,
            restaurant_id: restaurant.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margherita() -> Pizza {
        Pizza {
            id: 1,
            name: "Margherita".to_string(),
            ingredients: "Tomato, Mozzarella".to_string(),
        }
    }

    fn dough_bros() -> Restaurant {
        Restaurant {
            id: 7,
            name: "Dough Bros".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn test_validate_price_accepts_bounds() {
        assert_eq!(validate_price(1.0), Ok(1.0));
        assert_eq!(validate_price(30.0), Ok(30.0));
        assert_eq!(validate_price(12.5), Ok(12.5));
    }

    #[test]
    fn test_validate_price_rejects_out_of_range() {
        for price in [0.0, 0.99, 30.01, -5.0, 50.0, f64::INFINITY, f64::NAN] {
            assert_eq!(
                validate_price(price),
                Err(ValidationError::PriceOutOfRange),
                "price {price} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_restaurant_pizza_links_entities() {
        let new = NewRestaurantPizza::new(12.5, &margherita(), &dough_bros()).unwrap();

        assert_eq!(new.price, 12.5);
        assert_eq!(new.pizza_id, 1);
        assert_eq!(new.restaurant_id, 7);
    }

    #[test]
    fn test_new_restaurant_pizza_invalid_price() {
        let result = NewRestaurantPizza::new(31.0, &margherita(), &dough_bros());

        assert_eq!(result, Err(ValidationError::PriceOutOfRange));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Price must be between 1 and 30."
        );
    }
}
