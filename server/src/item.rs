use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A persisted item as stored and returned by the API.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// An item that passed validation and has not been assigned an id yet.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Item name is required")]
    MissingName,

    #[error("Item price is required")]
    MissingPrice,

    #[error("Item price must be a number")]
    InvalidPrice,

    #[error("Item price must not be negative")]
    NegativePrice,

    #[error("Item description must be a string")]
    InvalidDescription,
}

impl NewItem {
    /// Builds a validated record from an untyped create payload.
    ///
    /// Numeric strings are accepted for `price` the same way a document
    /// store casts them on write; everything else that is not a finite,
    /// non-negative number is rejected.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let fields = payload.as_object().ok_or(ValidationError::NotAnObject)?;

        let name = match fields.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => return Err(ValidationError::MissingName),
        };

        let description = match fields.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(ValidationError::InvalidDescription),
        };

        let price = match fields.get("price") {
            None | Some(Value::Null) => return Err(ValidationError::MissingPrice),
            Some(v) => parse_price(v)?,
        };

        Ok(Self {
            name,
            description,
            price,
        })
    }

    pub fn with_id(self, id: String) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

fn parse_price(value: &Value) -> Result<f64, ValidationError> {
    let price = match value {
        Value::Number(n) => n.as_f64().ok_or(ValidationError::InvalidPrice)?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidPrice)?,
        _ => return Err(ValidationError::InvalidPrice),
    };

    if !price.is_finite() {
        return Err(ValidationError::InvalidPrice);
    }
    if price < 0.0 {
        return Err(ValidationError::NegativePrice);
    }
    Ok(price)
}
