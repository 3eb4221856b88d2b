use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use eduquiz::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(err) = config.validate_for_production() {
        log::warn!("{}", err);
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origin = config.cors_allowed_origin.clone();
    log::info!(
        "Using model {} (checkpoint after question {}, {} supplemental questions)",
        config.openai_model,
        config.quiz.checkpoint_index + 1,
        config.quiz.supplemental_batch_size
    );

    let state = AppState::new(config);

    log::info!("Starting HTTP server on {}:{}", host, port);
    HttpServer::new(move || {
        let cors = if allowed_origin == "*" {
            Cors::default().allow_any_origin()
        } else {
            Cors::default().allowed_origin(&allowed_origin)
        }
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
        .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
