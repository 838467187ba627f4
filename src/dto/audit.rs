//! DTOs for the audit trail.

use serde::Serialize;

use crate::domain::audit::{AuditAction, AuditLog};
use crate::domain::display::{ProductLabel, ProductLookup, resolve_product_label};
use crate::domain::filters::AuditFilterState;
use crate::domain::product::Product;
use crate::domain::types::{AuditLogId, ProductId};

/// Display format of audit timestamps.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One audit entry ready for the table.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRow {
    pub id: AuditLogId,
    pub product_id: ProductId,
    pub action: AuditAction,
    pub action_label: &'static str,
    pub action_badge: &'static str,
    pub timestamp: String,
    pub historical_title: Option<String>,
    pub label: ProductLabel,
    /// Label shown when the live lookup cannot complete.
    pub fallback: ProductLabel,
    pub details: Option<String>,
}

impl AuditRow {
    /// Builds the row with the product label resolved against `lookup`.
    pub fn with_lookup(log: &AuditLog, lookup: ProductLookup<'_>) -> Self {
        let historical_title = log.historical_title();
        Self {
            id: log.id.clone(),
            product_id: log.product_id.clone(),
            action: log.action,
            action_label: log.action.label(),
            action_badge: log.action.badge(),
            timestamp: log.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            historical_title: historical_title.map(str::to_string),
            label: resolve_product_label(&log.product_id, lookup, historical_title),
            fallback: resolve_product_label(
                &log.product_id,
                ProductLookup::Missing,
                historical_title,
            ),
            details: log.details_pretty(),
        }
    }
}

impl From<&AuditLog> for AuditRow {
    /// Rows start out with the live product still loading; the page fetches
    /// the resolved label lazily.
    fn from(log: &AuditLog) -> Self {
        Self::with_lookup(log, ProductLookup::Loading)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl From<AuditAction> for ActionOption {
    fn from(action: AuditAction) -> Self {
        Self {
            value: action.as_str(),
            label: action.label(),
        }
    }
}

/// Data required to render the audit page.
#[derive(Debug)]
pub struct AuditPageData {
    pub filters: AuditFilterState,
    pub rows: Vec<AuditRow>,
    /// Products matching the text typed in the product box.
    pub suggestions: Vec<Product>,
    pub actions: Vec<ActionOption>,
}
