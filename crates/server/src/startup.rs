use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use configs::{AppConfig, DatabaseConfig, ServerConfig};
use sea_orm::DatabaseConnection;
use service::records::repo::seaorm::SeaOrmRecordRepository;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes::{self, ServerState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", cfg.host, cfg.port))
}

/// Open the store connection. Unless `fail_fast` is set, a failure is logged
/// and the service keeps running on a disconnected handle, so record routes
/// answer 500 until the process is restarted.
pub async fn connect_store(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    match models::db::connect(cfg).await {
        Ok(db) => Ok(db),
        Err(e) if cfg.fail_fast => Err(e.context("connecting to MySQL")),
        Err(e) => {
            error!(error = %e, url = %cfg.redacted_url(), "Error connecting to MySQL; serving without a store");
            Ok(DatabaseConnection::Disconnected)
        }
    }
}

/// Public entry: connect, build the app and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = connect_store(&cfg.database).await?;
    let state = ServerState::new(Arc::new(SeaOrmRecordRepository { db }), cfg.records.column_policy);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, column_policy = ?cfg.records.column_policy, "Server running");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_defaults() {
        let addr = bind_addr(&ServerConfig::default()).unwrap();
        assert_eq!(addr.port(), 5000);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let cfg = ServerConfig { host: "not a host".into(), ..ServerConfig::default() };
        assert!(bind_addr(&cfg).is_err());
    }

    #[tokio::test]
    async fn unreachable_store_is_not_fatal_by_default() {
        let cfg = DatabaseConfig { host: "127.0.0.1".into(), port: 1, ..DatabaseConfig::default() };
        let db = connect_store(&cfg).await.unwrap();
        assert!(matches!(db, DatabaseConnection::Disconnected));
    }

    #[tokio::test]
    async fn unreachable_store_fails_fast_when_asked() {
        let cfg = DatabaseConfig { host: "127.0.0.1".into(), port: 1, fail_fast: true, ..DatabaseConfig::default() };
        assert!(connect_store(&cfg).await.is_err());
    }
}
