//! Forms for managing catalog categories.

use serde::Deserialize;
use validator::Validate;

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryId, CategoryName};
use crate::forms::FormError;

/// Form used both to create and to rename a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(
        min = 2,
        max = 100,
        message = "El nombre debe tener entre 2 y 100 caracteres"
    ))]
    pub name: String,
}

impl TryFrom<CategoryForm> for NewCategory {
    type Error = FormError;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let name = CategoryName::new(form.name).map_err(|_| FormError::InvalidName)?;
        Ok(NewCategory::new(name))
    }
}

/// Parses a category identifier taken from the request path.
pub fn parse_category_id(raw: &str) -> Result<CategoryId, FormError> {
    CategoryId::new(raw).map_err(|_| FormError::InvalidCategory)
}
