use chrono::{DateTime, SubsecRound, Utc};
use diesel::{PgConnection, r2d2::ConnectionManager};
use serde::{Deserialize, Serialize};

use super::schema::*;
use crate::web::errors::{ServiceError, ServiceResult};

// type alias to use in multiple places
pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const HUMIDITY_MIN: i16 = 0;
pub const HUMIDITY_MAX: i16 = 100;

/// A single reading as stored in the `records` table.
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Insertable)]
#[table_name = "records"]
pub struct SensorRecord {
    /// Time recorded at (received by the server)
    pub recorded_at: DateTime<Utc>,
    /// Temperature in Fahrenheit
    pub temperature_f: i16,
    /// Humidity in percent
    pub humidity: i16,
}

/// Body accepted by the insert endpoint, the timestamp is always assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NewSensorRecord {
    pub temperature_f: i16,
    pub humidity: i16,
}

impl NewSensorRecord {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.humidity < HUMIDITY_MIN || self.humidity > HUMIDITY_MAX {
            return Err(ServiceError::ValidationError(format!(
                "humidity must be between {} and {}, got {}",
                HUMIDITY_MIN, HUMIDITY_MAX, self.humidity
            )));
        }
        Ok(())
    }

    pub fn recorded_at(self, now: DateTime<Utc>) -> SensorRecord {
        SensorRecord {
            // Postgres only keeps microseconds
            recorded_at: now.trunc_subsecs(6),
            temperature_f: self.temperature_f,
            humidity: self.humidity,
        }
    }
}
