//! Role Pricing Template Model (角色定价模板)

use super::serde_thing;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::order::DiscountKind;
use surrealdb::sql::Thing;
use validator::Validate;

/// Named discount rule scoped to a company or a subset of its stores
///
/// Historical orders snapshot a template's terms at assignment time, so
/// templates are soft-deleted (`is_active = false`) and never removed while
/// referenced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolePricingTemplate {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub company_id: String,
    /// Store scope: empty/None = company-wide
    #[serde(default)]
    pub store_ids: Option<Vec<String>>,
    /// Free-text role label ("Student", "DM", "返场玩家"...), not an enum
    pub role_name: String,
    pub discount_kind: DiscountKind,
    /// Percentage (50 = 50%) or fixed amount; ignored for FREE
    pub discount_value: f64,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_by: Option<String>,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create role pricing template payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RolePricingTemplateCreate {
    pub company_id: String,
    #[serde(default)]
    pub store_ids: Option<Vec<String>>,
    #[validate(length(min = 1, max = 64))]
    pub role_name: String,
    pub discount_kind: DiscountKind,
    #[validate(range(min = 0.0))]
    pub discount_value: f64,
    #[serde(default)]
    pub valid_from: Option<NaiveDate>,
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Update role pricing template payload
///
/// Exhaustive field list; unknown fields are rejected instead of merged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RolePricingTemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_kind: Option<DiscountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payload_rejects_unknown_fields() {
        let result: Result<RolePricingTemplateCreate, _> = serde_json::from_str(
            r#"{"company_id":"c1","role_name":"Student","discount_kind":"PERCENTAGE","discount_value":50.0,"surprise":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_template_id_serializes_as_string() {
        let tpl = RolePricingTemplate {
            id: Some(Thing::from(("role_pricing_template", "abc"))),
            company_id: "c1".into(),
            store_ids: None,
            role_name: "Student".into(),
            discount_kind: DiscountKind::Percentage,
            discount_value: 50.0,
            valid_from: None,
            valid_to: None,
            is_active: true,
            created_by: None,
            created_at: 0,
        };
        let json = serde_json::to_value(&tpl).unwrap();
        assert_eq!(json["id"], "role_pricing_template:abc");
    }
}
