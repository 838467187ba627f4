use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub product_count: Option<u64>,
}

/// Body of `POST /categories` and `PUT /categories/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
}

impl NewCategory {
    #[must_use]
    pub fn new(name: CategoryName) -> Self {
        Self { name }
    }
}

/// Category together with the number of products filed under it.
#[derive(Clone, Debug, Serialize)]
pub struct CategoryWithCount {
    pub category: Category,
    /// `None` when the count query failed.
    pub product_count: Option<u64>,
}
