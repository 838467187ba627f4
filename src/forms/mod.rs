//! Form definitions backing the dashboard routes.

use thiserror::Error;
use validator::ValidationErrors;

pub mod categories;
pub mod filters;
pub mod products;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data. The messages are shown to
/// the user as-is.
pub enum FormError {
    #[error("{}", validation_messages(.0))]
    Validation(#[from] ValidationErrors),

    #[error("Título no válido")]
    InvalidTitle,

    #[error("Descripción no válida")]
    InvalidDescription,

    #[error("El precio debe ser mayor a 0")]
    InvalidPrice,

    #[error("Stock no válido")]
    InvalidStock,

    #[error("Selecciona una categoría")]
    InvalidCategory,

    #[error("Nombre no válido")]
    InvalidName,

    #[error("Ingresa una URL válida")]
    InvalidUrl,

    #[error("Producto no válido")]
    InvalidProduct,
}

/// Joins the field-level messages of `errors`, ordered by field name.
pub fn validation_messages(errors: &ValidationErrors) -> String {
    let mut fields = errors.field_errors().into_iter().collect::<Vec<_>>();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field}: {}", error.code),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
