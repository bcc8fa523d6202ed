//! Discount Resolver
//!
//! Repository-backed resolution of role-template and calendar discounts.
//! Resolution is advisory: an unresolvable template or calendar id returns
//! the original amount unchanged with a "no discount applied" provenance
//! note, never an error.

use super::calculator::{apply_calendar_entries, apply_template};
use super::matcher::{calendar_entry_applies, template_applies};
use crate::db::repository::{PricingCalendarRepository, RolePricingTemplateRepository};
use chrono::NaiveDate;
use shared::order::{DiscountOutcome, TemplateSnapshot};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Discount resolver over the two catalogs
#[derive(Clone)]
pub struct DiscountResolver {
    templates: RolePricingTemplateRepository,
    calendar: PricingCalendarRepository,
}

impl std::fmt::Debug for DiscountResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountResolver").finish()
    }
}

impl DiscountResolver {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            templates: RolePricingTemplateRepository::new(db.clone()),
            calendar: PricingCalendarRepository::new(db),
        }
    }

    /// Resolve a role template into an immutable snapshot of its terms
    ///
    /// Returns the snapshot when the template exists, belongs to the
    /// company, covers the store and is valid on `as_of`; otherwise `Err`
    /// carries a human-readable miss reason (not a failure).
    pub async fn resolve_template(
        &self,
        company_id: &str,
        store_id: &str,
        template_id: &str,
        as_of: NaiveDate,
    ) -> Result<TemplateSnapshot, String> {
        let tpl = match self.templates.find_by_id(template_id).await {
            Ok(Some(tpl)) => tpl,
            Ok(None) => {
                tracing::warn!(template_id = %template_id, "role template not found, no discount applied");
                return Err(format!("template {} not found", template_id));
            }
            Err(e) => {
                tracing::warn!(template_id = %template_id, error = %e, "template lookup failed, no discount applied");
                return Err(format!("template {} lookup failed", template_id));
            }
        };

        if tpl.company_id != company_id {
            tracing::warn!(template_id = %template_id, "role template belongs to another company");
            return Err(format!("template {} not found", template_id));
        }

        if !template_applies(&tpl, store_id, as_of) {
            return Err(format!("template {} not applicable", template_id));
        }

        Ok(TemplateSnapshot {
            template_id: tpl.id.as_ref().map(|t| t.to_string()).unwrap_or_else(|| template_id.to_string()),
            role_name: tpl.role_name,
            discount_kind: tpl.discount_kind,
            discount_value: tpl.discount_value,
        })
    }

    /// Resolve a role-template discount against an amount
    pub async fn resolve_role_discount(
        &self,
        company_id: &str,
        store_id: &str,
        template_id: &str,
        original_amount: f64,
        as_of: NaiveDate,
    ) -> DiscountOutcome {
        match self
            .resolve_template(company_id, store_id, template_id, as_of)
            .await
        {
            Ok(snapshot) => apply_template(original_amount, &snapshot),
            Err(note) => DiscountOutcome::none(original_amount, note),
        }
    }

    /// Resolve calendar discounts for a store and date against an amount
    ///
    /// When several entries apply (e.g. a company-wide holiday plus a
    /// store-specific special), they stack sequentially — see
    /// [`apply_calendar_entries`].
    pub async fn resolve_calendar_discount(
        &self,
        company_id: &str,
        store_id: &str,
        date: NaiveDate,
        amount: f64,
    ) -> DiscountOutcome {
        let entries = match self.calendar.find_for_date(company_id, date).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "calendar lookup failed, no discount applied");
                return DiscountOutcome::none(amount, "calendar lookup failed");
            }
        };

        let applicable: Vec<_> = entries
            .into_iter()
            .filter(|e| calendar_entry_applies(e, store_id, date))
            .collect();

        apply_calendar_entries(amount, &applicable)
    }
}
