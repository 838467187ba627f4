use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::product::{NewProduct, Product, UpdateStock};
use crate::domain::types::{
    CategoryId, ImageUrl, Price, ProductDescription, ProductId, ProductTitle,
};
use crate::forms::FormError;

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
/// Form data for creating or editing a product.
pub struct ProductForm {
    #[validate(length(
        min = 2,
        max = 200,
        message = "El título debe tener entre 2 y 200 caracteres"
    ))]
    pub title: String,
    #[validate(length(
        min = 10,
        max = 1000,
        message = "La descripción debe tener entre 10 y 1000 caracteres"
    ))]
    pub description: String,
    #[validate(range(min = 0.01, message = "El precio debe ser mayor a 0"))]
    pub price: f64,
    #[validate(range(min = 0, message = "El stock no puede ser negativo"))]
    pub stock: i64,
    #[validate(length(min = 1, message = "Selecciona una categoría"))]
    pub category_id: String,
    /// Blank means no picture.
    #[serde(default)]
    pub image: String,
}

impl ProductForm {
    /// Prefills the edit form with the current product values.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price,
            stock: i64::from(product.stock),
            category_id: product
                .category_id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            image: product.image.clone().unwrap_or_default(),
        }
    }
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewProduct {
            title: ProductTitle::new(form.title).map_err(|_| FormError::InvalidTitle)?,
            description: ProductDescription::new(form.description)
                .map_err(|_| FormError::InvalidDescription)?,
            price: Price::new(form.price).map_err(|_| FormError::InvalidPrice)?,
            stock: u32::try_from(form.stock).map_err(|_| FormError::InvalidStock)?,
            category_id: CategoryId::new(form.category_id)
                .map_err(|_| FormError::InvalidCategory)?,
            image: ImageUrl::parse_optional(&form.image).map_err(|_| FormError::InvalidUrl)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Form data for setting the stock of a product.
pub struct StockForm {
    #[validate(range(min = 0, message = "El stock no puede ser negativo"))]
    pub stock: i64,
}

impl TryFrom<StockForm> for UpdateStock {
    type Error = FormError;

    fn try_from(form: StockForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let stock = u32::try_from(form.stock).map_err(|_| FormError::InvalidStock)?;
        Ok(UpdateStock { stock })
    }
}

/// Parses a product identifier taken from the request path.
pub fn parse_product_id(raw: &str) -> Result<ProductId, FormError> {
    ProductId::new(raw).map_err(|_| FormError::InvalidProduct)
}
