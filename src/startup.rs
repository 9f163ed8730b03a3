use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::Request,
    response::Response,
    routing::{get, put},
    serve::Serve,
};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Span, info, info_span};
use uuid::Uuid;

use crate::{
    configuration::{DatabaseSettings, Settings, StoreBackend},
    operations::RecipientOperations,
    routes::{create_recipient, delete_recipient, health_check, list_recipients, update_recipient},
    store::{InMemoryRecipientStore, PgRecipientStore, RecipientStore},
};

pub struct AppState {
    pub operations: RecipientOperations,
}

pub async fn run(
    listener: TcpListener,
    store: Arc<dyn RecipientStore>,
) -> anyhow::Result<Serve<TcpListener, Router, Router>> {
    let app_state = Arc::new(AppState {
        operations: RecipientOperations::new(store),
    });
    let app = Router::new()
        .route("/health_check", get(health_check))
        .route(
            "/users/{user_id}/recipients",
            get(list_recipients).post(create_recipient),
        )
        .route(
            "/users/{user_id}/recipients/{recipient_id}",
            put(update_recipient).delete(delete_recipient),
        )
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = Uuid::new_v4();
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        request_id = ?request_id,
                        status = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    let status = response.status();
                    span.record("status", status.as_u16());
                    info!(parent: span, ?status, ?latency, "Response sent");
                }),
        );

    Ok(axum::serve(listener, app))
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn RecipientStore> = match configuration.application.store {
            StoreBackend::Postgres => Arc::new(PgRecipientStore::new(get_connection_pool(
                &configuration.database,
            ))),
            StoreBackend::InMemory => Arc::new(InMemoryRecipientStore::new()),
        };

        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        ))
        .await?;
        let port = listener.local_addr()?.port();
        info!(port, store = ?configuration.application.store, "Listening");

        let server = run(listener, store).await?;

        Ok(Self { server, port })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        Ok(self.server.await?)
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(configuration.connect_options())
}
