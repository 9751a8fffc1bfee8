/// Game Sales Dashboard Server
///
/// Loads the sales dataset once from MySQL, then serves filtered snapshots
/// as JSON. A failed load does not stop the server; it serves an empty
/// dataset and reports why.

use gamesales::config::{load_dotenv, ServerConfig};
use gamesales::loader::load_from_env;
use gamesales::server::run_server;
use gamesales::Dashboard;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    load_dotenv();

    let server = ServerConfig::from_env().unwrap_or_else(|e| {
        log::error!("{}; falling back to defaults", e);
        ServerConfig::default()
    });

    // One query, one connection, released before serving
    let dashboard = Dashboard::from_load(load_from_env().await);

    run_server(dashboard, &server.host, server.port).await
}
