use diesel::{
    connection::SimpleConnection, insert_into, prelude::*, ConnectionError, SqliteConnection,
};
use diesel_migrations::MigrationHarness;
use tokio::task::JoinError;

use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza,
};
use crate::{schema, MIGRATIONS};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to database: {0}")]
    Connection(#[from] ConnectionError),
    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("failed to run migrations: {0}")]
    Migration(Box<dyn std::error::Error + Send + Sync>),
    #[error("database task failed: {0}")]
    Task(#[from] JoinError),
}

pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Location of the SQLite store. Every unit of work opens its own connection.
#[derive(Debug, Clone)]
pub struct Database {
    url: String,
}

impl Database {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Opens a connection that waits up to `BUSY_TIMEOUT_MS` for a lock held
    /// by another connection instead of failing with `SQLITE_BUSY`.
    pub fn establish(&self) -> Result<SqliteConnection, StoreError> {
        let mut conn = SqliteConnection::establish(&self.url)?;
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"
        ))?;
        Ok(conn)
    }

    /// Switches the store to WAL so readers never block the single writer,
    /// then applies pending migrations. The journal mode persists in the file.
    pub fn run_migrations(&self) -> Result<(), StoreError> {
        let mut conn = self.establish()?;
        conn.batch_execute("PRAGMA journal_mode = WAL;")?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(StoreError::Migration)?;
        Ok(())
    }

    /// [`Database::run_migrations`] on the blocking pool.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || db.run_migrations()).await?
    }

    /// Runs `f` on a fresh connection inside a blocking task. The connection is
    /// dropped when `f` returns, whatever the outcome.
    pub async fn run<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let db = self.clone();
        match tokio::task::spawn_blocking(move || {
            let mut conn = db.establish()?;
            f(&mut conn)
        })
        .await
        {
            Ok(result) => result,
            Err(e) => Err(StoreError::from(e).into()),
        }
    }
}

pub struct PizzaStore<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> PizzaStore<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn find_restaurant(&mut self, id: i32) -> QueryResult<Option<Restaurant>> {
        schema::restaurants::table
            .find(id)
            .select(Restaurant::as_select())
            .first(self.conn)
            .optional()
    }

    pub fn list_restaurants(&mut self) -> QueryResult<Vec<Restaurant>> {
        schema::restaurants::table
            .select(Restaurant::as_select())
            .load(self.conn)
    }

    pub fn find_pizza(&mut self, id: i32) -> QueryResult<Option<Pizza>> {
        schema::pizzas::table
            .find(id)
            .select(Pizza::as_select())
            .first(self.conn)
            .optional()
    }

    pub fn list_pizzas(&mut self) -> QueryResult<Vec<Pizza>> {
        schema::pizzas::table
            .select(Pizza::as_select())
            .load(self.conn)
    }

    /// Associations of `restaurant`, each paired with its pizza.
    pub fn restaurant_pizzas_of(
        &mut self,
        restaurant: &Restaurant,
    ) -> QueryResult<Vec<(RestaurantPizza, Pizza)>> {
        RestaurantPizza::belonging_to(restaurant)
            .inner_join(schema::pizzas::table)
            .select((RestaurantPizza::as_select(), Pizza::as_select()))
            .order(schema::restaurant_pizzas::id.asc())
            .load(self.conn)
    }

    pub fn insert_restaurant(&mut self, restaurant: &NewRestaurant) -> QueryResult<Restaurant> {
        insert_into(schema::restaurants::table)
            .values(restaurant)
            .returning(Restaurant::as_returning())
            .get_result(self.conn)
    }

    pub fn insert_pizza(&mut self, pizza: &NewPizza) -> QueryResult<Pizza> {
        insert_into(schema::pizzas::table)
            .values(pizza)
            .returning(Pizza::as_returning())
            .get_result(self.conn)
    }

    pub fn insert_restaurant_pizza(
        &mut self,
        restaurant_pizza: &NewRestaurantPizza,
    ) -> QueryResult<RestaurantPizza> {
        insert_into(schema::restaurant_pizzas::table)
            .values(restaurant_pizza)
            .returning(RestaurantPizza::as_returning())
            .get_result(self.conn)
    }

    /// Deletes the restaurant together with its associations. Returns `false`
    /// when no restaurant has the given id.
    pub fn delete_restaurant(&mut self, id: i32) -> QueryResult<bool> {
        use schema::restaurant_pizzas::dsl::{restaurant_id, restaurant_pizzas};

        diesel::delete(restaurant_pizzas.filter(restaurant_id.eq(id))).execute(self.conn)?;
        let deleted = diesel::delete(schema::restaurants::table.find(id)).execute(self.conn)?;
        Ok(deleted > 0)
    }

    pub fn clear(&mut self) -> QueryResult<()> {
        diesel::delete(schema::restaurant_pizzas::table).execute(self.conn)?;
        diesel::delete(schema::restaurants::table).execute(self.conn)?;
        diesel::delete(schema::pizzas::table).execute(self.conn)?;
        Ok(())
    }
}
