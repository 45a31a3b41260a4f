use actix_web::{web, App, HttpServer};
use classroom_server::config::ServerConfig;
use classroom_server::jobs::ReapJob;
use classroom_server::middleware::cors::cors_middleware;
use classroom_server::middleware::request_trace::RequestTrace;
use classroom_server::middleware::structured_logger::StructuredLogger;
use classroom_server::routes;
use classroom_server::state::app_state::AppState;
use classroom_server::telemetry;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = AppState::from_config(&config);

    let cancel = CancellationToken::new();
    let reaper = ReapJob::from_config(app_state.store.clone(), &config).spawn(cancel.clone());

    let data = web::Data::new(app_state);

    info!(
        host = %config.host,
        port = config.port,
        score_policy = ?config.score_policy,
        "starting classroom server"
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.host.as_str(), config.port))
    .map_err(|e| {
        error!(error = %e, host = %config.host, port = config.port, "failed to bind");
        e
    })?
    .run();

    let result = server.await;

    cancel.cancel();
    if let Err(e) = reaper.await {
        error!(error = %e, "reap job panicked");
    }
    info!("classroom server stopped");

    result
}
