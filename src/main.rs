use crate::config::load_settings;
use crate::responses::html_error_response;
use crate::router::{handle, App};
use crate::service::HttpDataService;
use astra::Server;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod listing;
mod responses;
mod router;
mod service;
mod sessions;
mod spreadsheets;
mod templates;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match load_settings() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "configuration failed");
            std::process::exit(1);
        }
    };

    let service = match HttpDataService::new(&settings.service_url, settings.request_timeout()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "could not build data service client");
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match settings.bind_addr.parse() {
        Ok(a) => a,
        Err(e) => {
            error!(bind_addr = %settings.bind_addr, error = %e, "invalid bind address");
            std::process::exit(1);
        }
    };

    let app = App::new(Box::new(service), &settings);
    info!(%addr, service_url = %settings.service_url, "starting server");

    let server = Server::bind(&addr).max_workers(settings.max_workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let resp = match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => {
                if err.is_server_side() {
                    error!(%method, %path, error = %err, "request failed");
                }
                html_error_response(err)
            }
        };

        info!(
            %method,
            %path,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "handled"
        );
        resp
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}
