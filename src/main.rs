use std::sync::Arc;

use warden::config::Config;
use warden::http::request::{Method, Request};
use warden::http::response::{self, Response};
use warden::router::RouterBuilder;
use warden::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    let router = Arc::new(
        RouterBuilder::new()
            .route(Method::GET, "/", |_req: &mut Request| {
                Ok(Response::text("warden is up\n"))
            })?
            .route(Method::GET, "/item/(\\d+)", |req: &mut Request| {
                Ok(Response::text(format!("item {}\n", req.params[0])))
            })?
            .route(Method::GET, "/static(/.*)", |req: &mut Request| {
                let cache_date = req
                    .header("If-Modified-Since")
                    .and_then(|v| httpdate::parse_http_date(v).ok());
                Ok(match response::safe_path("public", &req.params[0]) {
                    Some(path) => Response::file(path, cache_date),
                    None => Response::not_found(),
                })
            })?
            .build(),
    );

    let server = Arc::new(Server::bind(&cfg).await?);

    let stopper = server.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            stopper.stop();
        }
    });

    server.run(router).await
}
