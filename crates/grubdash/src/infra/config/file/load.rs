use {
    crate::{
        domain::{self, Id, LineItem, Status},
        infra::config::{self, file},
    },
    std::path::Path,
    tokio::fs,
};

/// Load the seed data from a TOML file.
///
/// # Panics
///
/// This method panics if the file is invalid or on I/O errors.
pub async fn load(path: &Path) -> config::Seed {
    let data = fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    let seed: file::Seed = toml::de::from_str(&data)
        .unwrap_or_else(|e| panic!("TOML syntax error while reading {path:?}: {e}"));

    config::Seed {
        dishes: seed
            .dishes
            .into_iter()
            .map(|dish| domain::Dish {
                id: Id::from(dish.id),
                name: dish.name,
                description: dish.description,
                price: dish.price.get().into(),
                image_url: dish.image_url,
            })
            .collect(),
        orders: seed
            .orders
            .into_iter()
            .map(|order| domain::Order {
                id: Id::from(order.id),
                deliver_to: order.deliver_to,
                mobile_number: order.mobile_number,
                status: order.status.as_deref().map(Status::parse),
                dishes: order
                    .dishes
                    .into_iter()
                    .map(|item| LineItem {
                        dish: item.dish,
                        quantity: item.quantity.get().into(),
                    })
                    .collect(),
            })
            .collect(),
    }
}
