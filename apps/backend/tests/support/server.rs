use std::net::{SocketAddr, TcpListener};

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use classroom_server::middleware::cors::cors_middleware;
use classroom_server::middleware::request_trace::RequestTrace;
use classroom_server::middleware::structured_logger::StructuredLogger;
use classroom_server::routes;
use classroom_server::state::app_state::AppState;

/// Real HTTP server on a random local port, for exercising the client.
///
/// Returns the handle (to stop the server), the bound address, and the join
/// handle of the server future.
pub async fn start_test_server(
    state: AppState,
) -> Result<
    (
        ServerHandle,
        SocketAddr,
        tokio::task::JoinHandle<Result<(), std::io::Error>>,
    ),
    Box<dyn std::error::Error>,
> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .workers(1)
    .disable_signals()
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);

    Ok((handle, addr, join))
}

pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}")
}
