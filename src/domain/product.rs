use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, ImageUrl, Price, ProductDescription, ProductId, ProductTitle,
};

/// Stock above this amount is considered healthy.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// Product record as returned by the catalog backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: Option<Rating>,
    /// Soft-delete marker. Deleted products stay reachable by id.
    #[serde(default)]
    pub deleted: Option<bool>,
}

/// Coarse stock classification used for badges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Healthy,
    Low,
    Empty,
}

impl StockLevel {
    pub fn from_stock(stock: u32) -> Self {
        match stock {
            0 => StockLevel::Empty,
            s if s > LOW_STOCK_THRESHOLD => StockLevel::Healthy,
            _ => StockLevel::Low,
        }
    }

    /// Bootstrap contextual class for the badge.
    pub fn badge(self) -> &'static str {
        match self {
            StockLevel::Healthy => "success",
            StockLevel::Low => "warning",
            StockLevel::Empty => "danger",
        }
    }
}

impl Product {
    pub fn is_deleted(&self) -> bool {
        self.deleted.unwrap_or(false)
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_stock(self.stock)
    }

    /// Value of the units on hand at the current price.
    pub fn inventory_value(&self) -> f64 {
        self.price * f64::from(self.stock)
    }
}

/// Validated payload for creating a product.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: ProductTitle,
    pub description: ProductDescription,
    pub price: Price,
    pub stock: u32,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageUrl>,
}

/// The backend accepts the same shape on `PUT /products/{id}`.
pub type UpdateProduct = NewProduct;

/// Body of `PATCH /products/{id}/stock`.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct UpdateStock {
    pub stock: u32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_backend_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "title": "Lamp",
            "description": null,
            "price": 19.99,
            "stock": 4,
            "categoryId": "987fcdeb-51a2-43d1-a5c6-987654321000",
            "categoryName": "Hogar",
            "rating": { "rate": 4.5, "count": 10 }
        }))
        .unwrap();

        assert_eq!(product.title, "Lamp");
        assert_eq!(product.category_name.as_deref(), Some("Hogar"));
        assert!(product.description.is_none());
        assert!(!product.is_deleted());
        assert_eq!(product.stock_level(), StockLevel::Low);
    }

    #[test]
    fn stock_levels() {
        assert_eq!(StockLevel::from_stock(0), StockLevel::Empty);
        assert_eq!(StockLevel::from_stock(10), StockLevel::Low);
        assert_eq!(StockLevel::from_stock(11), StockLevel::Healthy);
        assert_eq!(StockLevel::Empty.badge(), "danger");
    }

    #[test]
    fn new_product_serializes_camel_case_without_empty_image() {
        let payload = NewProduct {
            title: ProductTitle::new("Lamp").unwrap(),
            description: ProductDescription::new("A warm desk lamp").unwrap(),
            price: Price::new(19.99).unwrap(),
            stock: 3,
            category_id: CategoryId::new("cat-1").unwrap(),
            image: None,
        };

        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "title": "Lamp",
                "description": "A warm desk lamp",
                "price": 19.99,
                "stock": 3,
                "categoryId": "cat-1"
            })
        );
    }
}
