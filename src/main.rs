use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use sqlx::PgPool;

use taskhub::auth::{ensure_admin_account, AuthGate};
use taskhub::config::Config;
use taskhub::routes;
use taskhub::store::{PgUserStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    // Also asserts JWT_SECRET is present, so a keyless deployment dies here.
    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    ensure_admin_account(store.as_ref())
        .await
        .expect("Failed to provision the default admin account");

    let store_data: web::Data<dyn UserStore> = web::Data::from(store);

    info!("starting taskhub at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(store_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:4200")
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").wrap(AuthGate).configure(routes::config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
