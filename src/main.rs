use std::io;

use actix_web::{App, HttpServer, middleware};
use env_logger::Env;
use log::{error, info};

use homepod_data_server::*;
use homepod_data_server::config::Settings;

fn to_io_error<E: std::fmt::Display>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().map_err(to_io_error)?;

    let data = AppData::new(&settings);
    // Without a working store there is nothing to serve
    if let Err(e) = data.start() {
        error!("Cannot start storage: {}", e);
        return Err(to_io_error(e));
    }

    info!("Listening on {}", settings.bind_address());
    let server_data = data.clone();
    let result = HttpServer::new(move || {
        App::new()
            .data(server_data.clone())
            // enable logger
            .wrap(middleware::Logger::default())
            .configure(api_service::config)
    })
        .bind(settings.bind_address())?
        .run()
        .await;

    info!("Shutting down");
    data.stop().map_err(to_io_error)?;
    result
}
