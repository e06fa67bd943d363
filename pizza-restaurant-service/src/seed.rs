use diesel::SqliteConnection;

use crate::models::{NewPizza, NewRestaurant, NewRestaurantPizza, ValidationError};
use crate::store::{PizzaStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

const RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const OFFERINGS: &[(usize, usize, f64)] = &[(0, 0, 1.0), (1, 1, 4.0), (2, 2, 5.0)];

/// Replaces every row with a small fixed data set, in one transaction.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, SeedError> {
    conn.immediate_transaction(|conn| {
        let mut store = PizzaStore::new(conn);
        store.clear()?;

        let restaurants = RESTAURANTS
            .iter()
            .map(|&(name, address)| store.insert_restaurant(&NewRestaurant { name, address }))
            .collect::<Result<Vec<_>, _>>()?;
        let pizzas = PIZZAS
            .iter()
            .map(|&(name, ingredients)| store.insert_pizza(&NewPizza { name, ingredients }))
            .collect::<Result<Vec<_>, _>>()?;

        for &(restaurant, pizza, price) in OFFERINGS {
            let new = NewRestaurantPizza::new(price, &pizzas[pizza], &restaurants[restaurant])?;
            store.insert_restaurant_pizza(&new)?;
        }

        Ok(SeedSummary {
            restaurants: restaurants.len(),
            pizzas: pizzas.len(),
            restaurant_pizzas: OFFERINGS.len(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{seed_dough_bros, test_database};

    #[test]
    fn test_seed_replaces_existing_rows() {
        let (_dir, db) = test_database();
        let conn = &mut db.establish().unwrap();
        seed_dough_bros(conn);

        let summary = seed(conn).unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                restaurants: 3,
                pizzas: 3,
                restaurant_pizzas: 3,
            }
        );
        let mut store = PizzaStore::new(conn);
        let restaurants = store.list_restaurants().unwrap();
        assert_eq!(restaurants.len(), 3);
        assert!(restaurants.iter().all(|r| r.name != "Dough Bros"));
        assert_eq!(store.list_pizzas().unwrap().len(), 3);

        let offerings = store.restaurant_pizzas_of(&restaurants[1]).unwrap();
        assert_eq!(offerings.len(), 1);
        assert_eq!(offerings[0].0.price, 4.0);
        assert_eq!(offerings[0].1.name, "Geri");
    }

    #[test]
    fn test_seed_twice() {
        let (_dir, db) = test_database();
        let conn = &mut db.establish().unwrap();

        seed(conn).unwrap();
        seed(conn).unwrap();

        assert_eq!(PizzaStore::new(conn).list_restaurants().unwrap().len(), 3);
    }
}
