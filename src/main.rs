use log::{error, info};
use std::fs;
use std::io;

use workshare_backend::config::AppConfig;
use workshare_backend::db::connect_db;
use workshare_backend::storage::LocalFileStorage;

#[actix_rt::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = AppConfig::from_env();

    let db = connect_db(&config).await.map_err(|e| {
        error!("db connect failed: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;

    let storage = LocalFileStorage::from_config(&config);
    fs::create_dir_all(storage.root())?;
    info!(
        "database {} ready, storing uploads under {} served from {}",
        config.database_url(),
        storage.root().display(),
        storage.base_url()
    );

    drop(db);
    Ok(())
}
