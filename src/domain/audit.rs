use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::display::historical_title;
use crate::domain::types::{AuditLogId, ProductId, TypeConstraintError};

/// Immutable record of one operation performed on a product.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: AuditLogId,
    /// Weak reference: the product may have been deleted since.
    pub product_id: ProductId,
    pub action: AuditAction,
    pub timestamp: DateTime<Utc>,
    /// Snapshot captured by the backend when the action happened.
    #[serde(default)]
    pub details: Option<Map<String, Value>>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    StockUpdate,
}

impl AuditAction {
    pub const ALL: [AuditAction; 4] = [
        AuditAction::Create,
        AuditAction::Update,
        AuditAction::Delete,
        AuditAction::StockUpdate,
    ];

    /// Wire name used in URLs and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::StockUpdate => "STOCK_UPDATE",
        }
    }

    /// Human readable label shown in the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            AuditAction::Create => "Creación",
            AuditAction::Update => "Actualización",
            AuditAction::Delete => "Eliminación",
            AuditAction::StockUpdate => "Actualización de Stock",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            AuditAction::Create => "success",
            AuditAction::Update => "info",
            AuditAction::Delete => "danger",
            AuditAction::StockUpdate => "warning",
        }
    }
}

impl Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            "STOCK_UPDATE" => Ok(AuditAction::StockUpdate),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown audit action `{other}`"
            ))),
        }
    }
}

impl AuditLog {
    /// Product title captured at the time of the action, if any.
    pub fn historical_title(&self) -> Option<&str> {
        self.details.as_ref().and_then(historical_title)
    }

    /// Pretty-printed details for display, `None` when nothing was captured.
    pub fn details_pretty(&self) -> Option<String> {
        self.details
            .as_ref()
            .and_then(|details| serde_json::to_string_pretty(details).ok())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_backend_entry() {
        let log: AuditLog = serde_json::from_value(json!({
            "id": "64f1a2b3c4d5e6f7a8b9c0d1",
            "productId": "123e4567-e89b-12d3-a456-426614174000",
            "action": "STOCK_UPDATE",
            "timestamp": "2023-10-01T12:00:00Z",
            "details": { "title": "Lamp", "stock": 10 }
        }))
        .unwrap();

        assert_eq!(log.action, AuditAction::StockUpdate);
        assert_eq!(log.historical_title(), Some("Lamp"));
        assert!(log.details_pretty().unwrap().contains("\"stock\": 10"));
    }

    #[test]
    fn missing_details_are_tolerated() {
        let log: AuditLog = serde_json::from_value(json!({
            "id": "1",
            "productId": "p",
            "action": "DELETE",
            "timestamp": "2023-10-01T12:00:00Z"
        }))
        .unwrap();

        assert!(log.details.is_none());
        assert!(log.historical_title().is_none());
        assert!(log.details_pretty().is_none());
    }

    #[test]
    fn action_parsing_round_trips_wire_names() {
        for action in AuditAction::ALL {
            assert_eq!(action.as_str().parse::<AuditAction>(), Ok(action));
        }
        assert_eq!("stock_update".parse(), Ok(AuditAction::StockUpdate));
        assert!("PURGE".parse::<AuditAction>().is_err());
    }
}
