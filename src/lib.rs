#[macro_use]
extern crate diesel;

use std::sync::Arc;

use log::info;

use crate::config::Settings;
use crate::store::Store;
use crate::web::errors::ServiceResult;

pub mod config;
pub mod models;
pub mod schema;
pub mod store;
pub mod web;

pub use crate::web::api_service;

#[derive(Clone)]
pub struct AppData {
    pub store: Arc<Store>,
    pub allow_dumps: bool,
}

impl AppData {
    pub fn new(settings: &Settings) -> Self {
        AppData {
            store: Arc::new(Store::new(settings.database_url.as_str())),
            allow_dumps: settings.allow_dumps,
        }
    }

    /// Opens the database and makes sure the records table exists, safe to call more than once.
    pub fn start(&self) -> ServiceResult<()> {
        self.store.connect()?;
        self.store.ensure_schema()?;
        info!("Storage ready (dumps {})", if self.allow_dumps { "allowed" } else { "banned" });
        Ok(())
    }

    pub fn stop(&self) -> ServiceResult<()> {
        self.store.disconnect()
    }
}
