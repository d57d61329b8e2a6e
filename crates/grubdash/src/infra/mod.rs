pub mod api;
pub mod cli;
pub mod config;
pub mod observe;
pub mod persistence;

pub use {api::Api, persistence::Store};
