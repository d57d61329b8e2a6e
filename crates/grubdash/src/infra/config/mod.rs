use crate::domain::{Dish, Order};

pub mod file;

/// Entities the collections start out with.
#[derive(Debug, Default)]
pub struct Seed {
    pub dishes: Vec<Dish>,
    pub orders: Vec<Order>,
}
