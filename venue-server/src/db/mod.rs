//! Database Module
//!
//! Embedded SurrealDB storage for the discount catalogs. Live order/ledger
//! state lives in redb (see `crate::ledger::storage`).

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "venue";
const DATABASE: &str = "booking";

/// Open (or create) the embedded catalog database
pub async fn init_db(path: &str) -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open catalog database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    tracing::info!(path = %path, "Catalog database ready");
    Ok(db)
}
