use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;

use egalitarian_division::config::ServerConfig;
use egalitarian_division::routes::{configure, json_config, AppState};

// ---------- Server bootstrap ----------
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();

    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let port = config.port;
    let json_limit = config.json_limit;
    log::info!(
        "default solver {}, cache capacity {}, solve timeout {:?}",
        config.solver.name(),
        config.cache_capacity,
        config.solve_timeout,
    );
    let state = web::Data::new(AppState::new(config));

    log::info!("Starting server on http://127.0.0.1:{}", port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(sentry_actix::Sentry::new())
            .app_data(json_config(json_limit))
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
