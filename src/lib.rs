#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod cors;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::Config;

use crate::{
    config::{ConfigFairing, DatabaseFairing},
    cors::CorsFairing,
    logging::LoggerFairing,
    store::StoreHandle,
};

/// Build a rocket. Configuration is loaded and the database connected when
/// the rocket is ignited.
pub fn build() -> Rocket<Build> {
    rocket::custom(config::figment())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .attach(DatabaseFairing)
        .attach(CorsFairing)
        .mount("/", api::routes())
        .register("/", api::catchers())
}

/// Build a rocket over an existing store, with default application config.
pub fn rocket_for_store(store: StoreHandle) -> Rocket<Build> {
    rocket::build()
        .attach(LoggerFairing)
        .attach(CorsFairing)
        .manage(Config::default())
        .manage(store)
        .mount("/", api::routes())
        .register("/", api::catchers())
}
