pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod schema;
pub mod services;

#[macro_use]
extern crate diesel;
