use std::sync::Mutex;

use actix_web::{App, test};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use diesel::prelude::*;
use serde_json::Value;

use homepod_data_server::*;
use homepod_data_server::config::Settings;

lazy_static! {
    // Database tests share one table
    pub static ref DATABASE_LOCK: Mutex<()> = Mutex::new(());
}

/// Settings pointing at the test database.
pub fn test_settings() -> Settings {
    dotenv::dotenv().ok();
    let database_url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    Settings {
        database_url,
        ..Settings::default()
    }
}

/// Same database, with unqualified names resolved in `schema` instead of `public`.
pub fn url_with_search_path(database_url: &str, schema: &str) -> String {
    let separator = if database_url.contains('?') { '&' } else { '?' };
    format!("{}{}options=-c%20search_path%3D{}", database_url, separator, schema)
}

/// Data for tests that never reach the database.
pub fn offline_data(allow_dumps: bool) -> AppData {
    AppData::new(&Settings {
        database_url: "postgres://nobody@127.0.0.1:1/none".to_string(),
        allow_dumps,
        ..Settings::default()
    })
}

/// Starts the store and empties the records table.
pub fn setup_database(settings: &Settings) -> AppData {
    let data = AppData::new(settings);
    data.start().expect("Cannot start store");

    let conn = data.store.pool().unwrap().get().unwrap();
    diesel::delete(schema::records::table).execute(&conn).unwrap();
    data
}

pub async fn init_service(data: AppData) -> impl Service<Request = actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .data(data)
            .configure(api_service::config)
    ).await
}

pub async fn call<S>(app: &mut S, req: actix_http::Request) -> (StatusCode, Value)
    where S: Service<Request = actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("Body is not json")
    };
    (status, value)
}

pub async fn get<S>(app: &mut S, uri: &str) -> (StatusCode, Value)
    where S: Service<Request = actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    call(app, test::TestRequest::get().uri(uri).to_request()).await
}

pub async fn post_json<S>(app: &mut S, body: Value) -> (StatusCode, Value)
    where S: Service<Request = actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
{
    call(app, test::TestRequest::post().uri("/").set_json(&body).to_request()).await
}

pub fn assert_eq_set(mut left: Value, mut right: Value) {
    let left = left.as_array_mut().expect("Left is not array");
    let right = right.as_array_mut().expect("Right is not array");

    assert_eq!(left.len(), right.len());
    left.sort_by_cached_key(|x| format!("{}", x));
    right.sort_by_cached_key(|x| format!("{}", x));
    assert_eq!(left, right)
}
