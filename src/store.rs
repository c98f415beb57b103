use std::sync::RwLock;

use chrono::Utc;
use diesel::{PgConnection, prelude::*, r2d2::ConnectionManager};
use log::info;

use crate::models::{NewSensorRecord, Pool, SensorRecord};
use crate::schema::{CREATE_RECORDS_TABLE, PROBE_RECORDS_TABLE, records};
use crate::web::errors::{ServiceError, ServiceResult};

/// Owns the connection pool and the lifecycle of the `records` table.
pub struct Store {
    database_url: String,
    pool: RwLock<Option<Pool>>,
}

impl Store {
    pub fn new<S: Into<String>>(database_url: S) -> Self {
        Store {
            database_url: database_url.into(),
            pool: RwLock::new(None),
        }
    }

    /// Opens the pool, does nothing if it is already open.
    /// Fails when the database cannot be reached.
    pub fn connect(&self) -> ServiceResult<()> {
        let mut pool = self.pool.write().map_err(lock_poisoned)?;
        if pool.is_some() {
            return Ok(());
        }

        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        *pool = Some(r2d2::Pool::builder().build(manager)?);
        info!("Database pool opened");
        Ok(())
    }

    pub fn disconnect(&self) -> ServiceResult<()> {
        let mut pool = self.pool.write().map_err(lock_poisoned)?;
        if pool.take().is_some() {
            info!("Database pool closed");
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.pool.read().map(|x| x.is_some()).unwrap_or(false)
    }

    pub fn pool(&self) -> ServiceResult<Pool> {
        self.pool.read().map_err(lock_poisoned)?
            .clone()
            .ok_or_else(|| ServiceError::ConnectionError("Database is not connected".to_string()))
    }

    /// Creates the `records` table, an already existing table counts as success.
    /// The columns of an existing table are not checked.
    pub fn ensure_schema(&self) -> ServiceResult<()> {
        let conn = self.pool()?.get()?;

        diesel::sql_query(CREATE_RECORDS_TABLE).execute(&conn)?;
        // Fails when the name belongs to something that is not a table
        diesel::sql_query(PROBE_RECORDS_TABLE).execute(&conn)?;
        info!("Records table ready");
        Ok(())
    }

    pub fn insert(&self, data: NewSensorRecord) -> ServiceResult<SensorRecord> {
        data.validate()?;
        self.insert_record(&data.recorded_at(Utc::now()))
    }

    /// Writes an already stamped record, constraint violations come back as errors.
    pub fn insert_record(&self, record: &SensorRecord) -> ServiceResult<SensorRecord> {
        let conn = self.pool()?.get()?;
        Ok(diesel::insert_into(records::table)
            .values(record)
            .get_result(&conn)?)
    }

    pub fn list_all(&self) -> ServiceResult<Vec<SensorRecord>> {
        let conn = self.pool()?.get()?;
        Ok(records::table.load(&conn)?)
    }

    pub fn latest(&self) -> ServiceResult<Option<SensorRecord>> {
        use crate::schema::records::dsl;

        let conn = self.pool()?.get()?;
        Ok(dsl::records
            .order(dsl::recorded_at.desc())
            .first(&conn)
            .optional()?)
    }
}

fn lock_poisoned<T>(_: T) -> ServiceError {
    ServiceError::InternalServerError("Pool lock poisoned".to_string())
}
