//! Server state

use crate::core::{Config, Result, ServerError};
use crate::db;
use crate::db::repository::{PricingCalendarRepository, RolePricingTemplateRepository};
use crate::ledger::LedgerManager;
use crate::pricing::{DiscountResolver, PriceDecomposer};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// 服务器状态 - 持有所有服务的单例引用
///
/// # 服务组件
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式目录数据库 (SurrealDB) |
/// | ledger | 支付台账 (redb) |
/// | resolver | 折扣解析器 |
/// | decomposer | 价格分解引擎 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub ledger: LedgerManager,
    pub resolver: DiscountResolver,
    pub decomposer: PriceDecomposer,
}

impl ServerState {
    /// Initialize every service from configuration
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| ServerError::Config(format!("cannot create work dir: {e}")))?;

        let db = db::init_db(&config.catalog_db_path())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let ledger = LedgerManager::new(config.ledger_db_path())
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let resolver = DiscountResolver::new(db.clone());
        let decomposer = PriceDecomposer::new(resolver.clone());

        tracing::info!(work_dir = %config.work_dir, "server state initialized");

        Ok(Self {
            config: config.clone(),
            db,
            ledger,
            resolver,
            decomposer,
        })
    }

    pub fn template_repo(&self) -> RolePricingTemplateRepository {
        RolePricingTemplateRepository::new(self.db.clone())
    }

    pub fn calendar_repo(&self) -> PricingCalendarRepository {
        PricingCalendarRepository::new(self.db.clone())
    }
}
