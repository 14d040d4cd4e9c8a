use std::{fs, io};

use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info};

use digit_server::{ServerConfig, ServerErr, configure, cors};
use machine_learning::{INPUT_SIZE, NUM_CLASSES, ParameterStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env()?;
    info!("starting with {config:?}");

    let params = ParameterStore::load(config.model_path()).map_err(|e| {
        error!("refusing to serve without a model: {e}");
        ServerErr::from(e)
    })?;
    info!(
        "loaded a {INPUT_SIZE} -> {} -> {NUM_CLASSES} network ({} parameters) from {}",
        params.hidden(),
        params.len(),
        config.model_path().display()
    );

    fs::create_dir_all(config.static_dir())?;

    let params = web::Data::new(params);
    let static_dir = config.static_dir().to_path_buf();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .app_data(params.clone())
            .configure(configure(static_dir.clone()))
    });

    if let Some(workers) = config.workers() {
        server = server.workers(workers.get());
    }

    let addr = config.addr();
    info!("listening at {addr}");

    server.bind(&addr)?.run().await?;

    info!("wrapping up, shutting down...");
    Ok(())
}
