use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use tasktrack::auth::TokenService;
use tasktrack::config::Config;
use tasktrack::error;
use tasktrack::routes;
use tasktrack::state::AppState;
use tasktrack::store::{PgStore, TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    let store = Arc::new(PgStore::new(pool));

    let state = AppState::new(
        store.clone() as Arc<dyn UserStore>,
        store as Arc<dyn TaskStore>,
        TokenService::new(&config.jwt_secret, config.token_ttl_secs),
    );

    log::info!("starting tasktrack server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(error::json_config())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await
}
