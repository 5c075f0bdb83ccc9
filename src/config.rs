use std::sync::Arc;

use log::{error, info};
use mongodb::Client as MongoClient;
use rocket::{
    fairing::{Fairing, Info, Kind},
    figment::{providers::Env, Figment},
    Build, Orbit, Rocket,
};
use serde::Deserialize;

use crate::{
    model::{db::admin::NewAdmin, mongodb::ensure_indexes_exist, validation::IdNumber},
    store::{MongoStore, Store, StoreHandle},
};

/// The configuration sources: Rocket's usual `Rocket.toml` and `ROCKET_*`
/// variables, plus the plain `MONGO_CONN_URI` (as `db_uri`) and `PORT`
/// variables, which take precedence.
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Env::raw().only(&["PORT"]))
        .merge(Env::raw().only(&["MONGO_CONN_URI"]).map(|_| "db_uri".into()))
}

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "any_origin")]
    allowed_origin: String,
}

fn any_origin() -> String {
    "*".to_string()
}

impl Config {
    /// Value of the `Access-Control-Allow-Origin` response header.
    pub fn allowed_origin(&self) -> &str {
        &self.allowed_origin
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_origin: any_origin(),
        }
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// An administrator to create when the database has none.
#[derive(Debug, Clone, Deserialize)]
struct AdminSeed {
    id_number: String,
    name: String,
}

/// Configuration for the database.
#[derive(Deserialize)]
struct DbConfig {
    // non-secrets
    #[serde(default = "default_db_name")]
    db_name: String,
    #[serde(default)]
    seed_admins: Vec<AdminSeed>,
    // secrets
    db_uri: String,
}

fn default_db_name() -> String {
    "votingDB".to_string()
}

impl DbConfig {
    /// Validate the configured admin seeds, naming the first bad one.
    fn admins(&self) -> Result<Vec<NewAdmin>, String> {
        self.seed_admins
            .iter()
            .map(|seed| {
                let id_number = IdNumber::parse(seed.id_number.as_str()).ok_or_else(|| {
                    format!("Seed admin {:?} has an invalid ID number", seed.name)
                })?;
                Ok(NewAdmin {
                    id_number,
                    name: seed.name.clone(),
                })
            })
            .collect()
    }
}

/// A fairing that loads the MongoDB config, connects to the database,
/// performs any setup necessary, and places both the `Client` and the
/// [`StoreHandle`] into managed state. The client is shut down when Rocket
/// shuts down.
pub struct DatabaseFairing;

#[rocket::async_trait]
impl Fairing for DatabaseFairing {
    fn info(&self) -> Info {
        Info {
            name: "MongoDB",
            kind: Kind::Ignite | Kind::Shutdown,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<DbConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load database config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        let seed_admins = match config.admins() {
            Ok(admins) => admins,
            Err(e) => {
                error!("Failed to load database config: {e}");
                return Err(rocket);
            }
        };
        info!("Loaded database config, connecting...");

        // Construct the connection.
        let client = match MongoClient::with_uri_str(&config.db_uri).await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to connect to database: {e}");
                return Err(rocket);
            }
        };
        let db = client.database(&config.db_name);

        // Ensure the required indexes exist.
        if let Err(e) = ensure_indexes_exist(&db).await {
            error!("Failed to connect to database: {e}");
            return Err(rocket);
        }

        // Seed the admins if there are none yet.
        let store = MongoStore::new(client.clone(), &db);
        match store.seed_admins(&seed_admins).await {
            Ok(0) => {}
            Ok(n) => info!("Seeded {n} admin(s)"),
            Err(e) => {
                error!("Failed to seed admins: {e}");
                return Err(rocket);
            }
        }
        info!("...database connection online!");

        // Manage the state.
        let store: StoreHandle = Arc::new(store);
        rocket = rocket.manage(client).manage(store);
        Ok(rocket)
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        if let Some(client) = rocket.state::<MongoClient>() {
            client.clone().shutdown().await;
            info!("Database connection closed");
        }
    }
}
