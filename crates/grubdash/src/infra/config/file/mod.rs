pub use load::load;
use {
    serde::Deserialize,
    serde_json::{Map, Value},
    std::num::NonZeroU64,
};

mod load;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Seed {
    #[serde(default)]
    dishes: Vec<Dish>,

    #[serde(default)]
    orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Dish {
    /// Kept as is so that orders in the same file can refer to the dish.
    id: String,
    name: String,
    description: String,
    price: NonZeroU64,
    image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Order {
    id: String,
    deliver_to: String,
    mobile_number: String,
    status: Option<String>,
    #[serde(default)]
    dishes: Vec<LineItem>,
}

#[derive(Debug, Deserialize)]
struct LineItem {
    quantity: NonZeroU64,
    /// Any other dish fields, copied into the order verbatim.
    #[serde(flatten)]
    dish: Map<String, Value>,
}
