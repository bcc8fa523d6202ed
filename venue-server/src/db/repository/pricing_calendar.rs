//! Pricing Calendar Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{
    PricingCalendarEntry, PricingCalendarEntryCreate, PricingCalendarEntryUpdate,
};
use chrono::NaiveDate;
use shared::order::CalendarDiscountKind;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "pricing_calendar";

fn validate_discount_value(kind: CalendarDiscountKind, value: f64) -> RepoResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RepoError::Validation(format!(
            "discount_value must be a non-negative number, got {value}"
        )));
    }
    if kind == CalendarDiscountKind::Percentage && value > 100.0 {
        return Err(RepoError::Validation(format!(
            "percentage discount must be between 0 and 100, got {value}"
        )));
    }
    Ok(())
}

fn is_company_wide(store_ids: &Option<Vec<String>>) -> bool {
    store_ids.as_ref().is_none_or(|ids| ids.is_empty())
}

#[derive(Clone)]
pub struct PricingCalendarRepository {
    base: BaseRepository,
}

impl PricingCalendarRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find entry by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<PricingCalendarEntry>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let entry: Option<PricingCalendarEntry> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(entry)
    }

    /// Find all entries for a company
    pub async fn find_for_company(&self, company_id: &str) -> RepoResult<Vec<PricingCalendarEntry>> {
        let company = company_id.to_string();
        let entries: Vec<PricingCalendarEntry> = self
            .base
            .db()
            .query("SELECT * FROM pricing_calendar WHERE company_id = $company ORDER BY date DESC")
            .bind(("company", company))
            .await?
            .take(0)?;
        Ok(entries)
    }

    /// Find active entries for a company on a date
    ///
    /// Returns both company-wide and store-scoped entries; store matching is
    /// applied by the pricing matcher.
    pub async fn find_for_date(
        &self,
        company_id: &str,
        date: NaiveDate,
    ) -> RepoResult<Vec<PricingCalendarEntry>> {
        let company = company_id.to_string();
        let date = date.to_string();
        let entries: Vec<PricingCalendarEntry> = self
            .base
            .db()
            .query(
                "SELECT * FROM pricing_calendar WHERE company_id = $company AND date = $date AND is_active = true",
            )
            .bind(("company", company))
            .bind(("date", date))
            .await?
            .take(0)?;
        Ok(entries)
    }

    /// Create a new calendar entry
    ///
    /// Enforces the base-design uniqueness invariant: at most one
    /// company-wide entry per (company, date).
    pub async fn create(&self, data: PricingCalendarEntryCreate) -> RepoResult<PricingCalendarEntry> {
        validate_discount_value(data.discount_kind, data.discount_value)?;

        if is_company_wide(&data.store_ids) {
            let existing = self.find_for_date(&data.company_id, data.date).await?;
            if existing.iter().any(|e| is_company_wide(&e.store_ids)) {
                return Err(RepoError::Duplicate(format!(
                    "A company-wide calendar entry already exists for {}",
                    data.date
                )));
            }
        }

        let entry = PricingCalendarEntry {
            id: None,
            company_id: data.company_id,
            store_ids: data.store_ids,
            date: data.date,
            calendar_kind: data.calendar_kind,
            discount_kind: data.discount_kind,
            discount_value: data.discount_value,
            is_active: true,
            created_at: chrono::Utc::now().timestamp_millis(),
        };

        let created: Option<PricingCalendarEntry> =
            self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create calendar entry".to_string()))
    }

    /// Update a calendar entry
    pub async fn update(
        &self,
        id: &str,
        data: PricingCalendarEntryUpdate,
    ) -> RepoResult<PricingCalendarEntry> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        let existing = self
            .find_by_id(&pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Calendar entry {} not found", id)))?;

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
            .ok_or_else(|| RepoError::NotFound(format!("Calendar entry {} not found", id)))
    }

    /// Hard delete a calendar entry
    ///
    /// Calendar terms are snapshotted into discount provenance at booking
    /// time, so entries carry no long-lived references.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id).to_string();
        if self.find_by_id(&pure_id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Calendar entry {} not found", id)));
        }
        let thing = make_thing(TABLE, &pure_id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_wide_detection() {
        assert!(is_company_wide(&None));
        assert!(is_company_wide(&Some(vec![])));
        assert!(!is_company_wide(&Some(vec!["s1".into()])));
    }

    #[test]
    fn test_validate_discount_value() {
        assert!(validate_discount_value(CalendarDiscountKind::Percentage, 10.0).is_ok());
        assert!(validate_discount_value(CalendarDiscountKind::Percentage, 120.0).is_err());
        assert!(validate_discount_value(CalendarDiscountKind::Fixed, 5_000.0).is_ok());
        assert!(validate_discount_value(CalendarDiscountKind::Fixed, -5.0).is_err());
    }
}
