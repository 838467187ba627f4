//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, bounded
//! names, positive prices) so that once a value reaches the domain layer it can
//! be sent to the catalog backend as-is.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateUrl;

/// Number of characters kept when abbreviating an identifier.
pub const SHORT_ID_LEN: usize = 8;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is outside the accepted length range.
    #[error("length must be between {min} and {max} characters")]
    InvalidLength { min: usize, max: usize },
    /// Provided price is zero, negative or not a finite number.
    #[error("price must be greater than zero")]
    NonPositivePrice,
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Trims and HTML-sanitizes free text entered in the dashboard.
pub fn sanitize_text(value: &str) -> String {
    ammonia::clean(value.trim()).trim().to_string()
}

fn bounded(value: String, min: usize, max: usize) -> Result<String, TypeConstraintError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(TypeConstraintError::EmptyString);
    }
    if len < min || len > max {
        return Err(TypeConstraintError::InvalidLength { min, max });
    }
    Ok(value)
}

/// Macro to generate newtypes for backend-assigned identifiers.
///
/// The backend hands out opaque string identifiers (UUIDs for catalog records,
/// object ids for audit entries); the dashboard only requires them to be
/// non-empty.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier ensuring it is not blank.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// First characters of the identifier, used where space is short.
            pub fn short(&self) -> String {
                self.0.chars().take(SHORT_ID_LEN).collect()
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ProductId, "Unique identifier for a product.");
id_newtype!(CategoryId, "Unique identifier for a category.");
id_newtype!(AuditLogId, "Unique identifier for an audit entry.");

/// Macro to generate sanitized text newtypes with length bounds.
macro_rules! bounded_text_newtype {
    ($name:ident, $min:expr, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Minimum accepted length in characters.
            pub const MIN_LEN: usize = $min;
            /// Maximum accepted length in characters.
            pub const MAX_LEN: usize = $max;

            /// Sanitizes the input and checks its length.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let sanitized = sanitize_text(&value.into());
                bounded(sanitized, Self::MIN_LEN, Self::MAX_LEN).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_text_newtype!(ProductTitle, 2, 200, "Product title shown in listings.");
bounded_text_newtype!(
    ProductDescription,
    10,
    1000,
    "Long product description shown in the details page."
);
bounded_text_newtype!(CategoryName, 2, 100, "Display name of a category.");

/// Unit price of a product, always strictly positive.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Smallest price accepted by the product form.
    pub const MIN: f64 = 0.01;

    /// Validates that the price is a finite number of at least one cent.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && value >= Self::MIN {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositivePrice)
        }
    }

    /// Returns the raw amount.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Absolute URL of a product picture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Validates the URL format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if !trimmed.validate_url() {
            return Err(TypeConstraintError::InvalidUrl);
        }
        Ok(Self(trimmed))
    }

    /// Parses an optional form value where blank means "no image".
    pub fn parse_optional(value: &str) -> Result<Option<Self>, TypeConstraintError> {
        if value.trim().is_empty() {
            Ok(None)
        } else {
            Self::new(value).map(Some)
        }
    }

    /// Borrow the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ImageUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
