//! Storage of the dishes and orders collections.
//!
//! The resource services only talk to the [`Repository`] trait so the
//! in-memory backend can be swapped for a real database without touching the
//! validation or handler logic.

use {
    crate::domain::{Dish, Id, Order},
    std::sync::Arc,
};

pub mod memory;

pub use memory::Memory;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("an entry with id {0} already exists")]
    Duplicate(Id),
}

/// Something stored in a collection under a unique id.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &Id;
}

impl Entity for Dish {
    fn id(&self) -> &Id {
        &self.id
    }
}

impl Entity for Order {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// A collection of entities. Listing returns them in insertion order.
#[async_trait::async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, Error>;

    async fn get(&self, id: &Id) -> Result<Option<T>, Error>;

    async fn create(&self, entity: T) -> Result<T, Error>;

    /// Replaces the stored entity that has the same id. Returns `None` if no
    /// such entity exists.
    async fn update(&self, entity: T) -> Result<Option<T>, Error>;

    /// Removes the entity and returns it, or `None` if it didn't exist.
    async fn delete(&self, id: &Id) -> Result<Option<T>, Error>;
}

/// The storage of the whole service, built once at start-up.
#[derive(Clone)]
pub struct Store {
    pub dishes: Arc<dyn Repository<Dish>>,
    pub orders: Arc<dyn Repository<Order>>,
}

impl Store {
    pub fn in_memory() -> Self {
        Self {
            dishes: Arc::new(Memory::<Dish>::default()),
            orders: Arc::new(Memory::<Order>::default()),
        }
    }

    /// An in-memory store holding the given entities. Fails if the same id
    /// shows up twice in a collection.
    pub async fn seeded(dishes: Vec<Dish>, orders: Vec<Order>) -> Result<Self, Error> {
        let store = Self::in_memory();
        for dish in dishes {
            store.dishes.create(dish).await?;
        }
        for order in orders {
            store.orders.create(order).await?;
        }
        Ok(store)
    }
}
