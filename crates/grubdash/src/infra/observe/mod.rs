//! This module implements the observability for the service. It exposes
//! functions which represent events that are meaningful to the system. These
//! functions are called when the corresponding events occur. They log the event
//! and update the metrics, if the event is worth measuring.

use {
    crate::{
        domain::{Dish, Order, dish, order, validation},
        infra::cli,
    },
    std::net::SocketAddr,
};

mod metrics;

/// Setup the observability from the command line arguments.
pub fn init(args: &cli::Args) {
    let mut config = ::observe::Config::default().with_env_filter(&args.log);
    if let Some(threshold) = args.stderr_threshold {
        config = config.with_stderr_threshold(threshold);
    }
    if args.use_json_logs {
        config = config.with_json_format();
    }
    ::observe::tracing::initialize_reentrant(&config);
    ::observe::panic_hook::install();
    metrics::init();
}

/// Observe that the API is up.
pub fn serving(addr: SocketAddr) {
    tracing::info!(%addr, "serving grubdash");
}

/// Observe the content of the seed file.
pub fn seeded(dishes: usize, orders: usize) {
    tracing::info!(dishes, orders, "loaded seed data");
}

/// Observe that a shutdown signal arrived.
pub fn shutting_down() {
    tracing::info!("received shutdown signal, stopping the API");
}

/// Observe a request rejected by a validation chain.
pub fn rejected(resource: &'static str, err: &validation::Error) {
    let status = match err {
        validation::Error::BadRequest(_) => "400",
        validation::Error::NotFound(_) => "404",
    };
    tracing::debug!(resource, status, %err, "request rejected");
    metrics::get()
        .validation_failures
        .with_label_values(&[resource, status])
        .inc();
}

pub fn dish_created(dish: &Dish) {
    tracing::info!(id = %dish.id, name = %dish.name, "dish created");
    mutation(dish::RESOURCE, "create");
}

pub fn dish_updated(dish: &Dish) {
    tracing::info!(id = %dish.id, name = %dish.name, "dish updated");
    mutation(dish::RESOURCE, "update");
}

pub fn order_created(order: &Order) {
    tracing::info!(id = %order.id, status = ?order.status, items = order.dishes.len(), "order created");
    mutation(order::RESOURCE, "create");
}

pub fn order_updated(order: &Order) {
    tracing::info!(id = %order.id, status = ?order.status, items = order.dishes.len(), "order updated");
    mutation(order::RESOURCE, "update");
}

pub fn order_deleted(order: &Order) {
    tracing::info!(id = %order.id, "order deleted");
    mutation(order::RESOURCE, "delete");
}

fn mutation(resource: &str, action: &str) {
    metrics::get()
        .mutations
        .with_label_values(&[resource, action])
        .inc();
}
