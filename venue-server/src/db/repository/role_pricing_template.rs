//! Role Pricing Template Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{
    RolePricingTemplate, RolePricingTemplateCreate, RolePricingTemplateUpdate,
};
use shared::order::DiscountKind;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "role_pricing_template";

/// Validate a discount value against its kind
fn validate_discount_value(kind: DiscountKind, value: f64) -> RepoResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RepoError::Validation(format!(
            "discount_value must be a non-negative number, got {value}"
        )));
    }
    if kind == DiscountKind::Percentage && value > 100.0 {
        return Err(RepoError::Validation(format!(
            "percentage discount must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct RolePricingTemplateRepository {
    base: BaseRepository,
}

impl RolePricingTemplateRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find template by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RolePricingTemplate>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let tpl: Option<RolePricingTemplate> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(tpl)
    }

    /// Find all templates for a company (including inactive, for admin views)
    pub async fn find_for_company(&self, company_id: &str) -> RepoResult<Vec<RolePricingTemplate>> {
        let company = company_id.to_string();
        let templates: Vec<RolePricingTemplate> = self
            .base
            .db()
            .query("SELECT * FROM role_pricing_template WHERE company_id = $company ORDER BY created_at DESC")
            .bind(("company", company))
            .await?
            .take(0)?;
        Ok(templates)
    }

    /// Find active templates applicable to a store
    ///
    /// Company-wide templates (empty store scope) are included alongside
    /// store-specific ones.
    pub async fn find_for_store(
        &self,
        company_id: &str,
        store_id: &str,
    ) -> RepoResult<Vec<RolePricingTemplate>> {
        let company = company_id.to_string();
        let store = store_id.to_string();
        let templates: Vec<RolePricingTemplate> = self
            .base
            .db()
            .query(
                r#"
                SELECT * FROM role_pricing_template
                WHERE company_id = $company AND is_active = true AND (
                    store_ids = NONE OR array::len(store_ids) = 0 OR $store IN store_ids
                )
                ORDER BY created_at DESC
                "#,
            )
            .bind(("company", company))
            .bind(("store", store))
            .await?
            .take(0)?;
        Ok(templates)
    }

    /// Create a new template
    pub async fn create(&self, data: RolePricingTemplateCreate) -> RepoResult<RolePricingTemplate> {
        validate_discount_value(data.discount_kind, data.discount_value)?;

        let template = RolePricingTemplate {
            id: None,
            company_id: data.company_id,
            store_ids: data.store_ids,
            role_name: data.role_name,
            discount_kind: data.discount_kind,
            discount_value: data.discount_value,
            valid_from: data.valid_from,
            valid_to: data.valid_to,
            is_active: true,
            created_by: data.created_by,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let created: Option<RolePricingTemplate> =
            self.base.db().create(TABLE).content(template).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create role pricing template".to_string()))
    }

    /// Update a template
    pub async fn update(
        &self,
        id: &str,
        data: RolePricingTemplateUpdate,
    ) -> RepoResult<RolePricingTemplate> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let existing = self
            .find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Role pricing template {} not found", id)))?;

        // Validate the resulting kind/value combination
        let kind = data.discount_kind.unwrap_or(existing.discount_kind);
        let value = data.discount_value.unwrap_or(existing.discount_value);
        validate_discount_value(kind, value)?;

        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?;

        self.find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Role pricing template {} not found", id)))
    }

    /// Soft-delete a template
    ///
    /// Historical orders snapshot template terms, so templates are
    /// deactivated rather than removed.
    pub async fn deactivate(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        if self.find_by_id(&pure_id).await?.is_none() {
            return Err(RepoError::NotFound(format!(
                "Role pricing template {} not found",
                id
            )));
        }
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("UPDATE $thing SET is_active = false")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_discount_value() {
        assert!(validate_discount_value(DiscountKind::Percentage, 50.0).is_ok());
        assert!(validate_discount_value(DiscountKind::Percentage, 101.0).is_err());
        assert!(validate_discount_value(DiscountKind::Fixed, 5_000.0).is_ok());
        assert!(validate_discount_value(DiscountKind::Fixed, -1.0).is_err());
        assert!(validate_discount_value(DiscountKind::Free, 0.0).is_ok());
        assert!(validate_discount_value(DiscountKind::Fixed, f64::NAN).is_err());
    }
}
