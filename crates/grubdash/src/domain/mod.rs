pub mod dish;
pub mod id;
pub mod order;
pub mod validation;

pub use {
    dish::{Dish, Dishes},
    id::Id,
    order::{LineItem, Order, Orders, Status},
};
