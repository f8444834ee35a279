use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

impl Item {
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Body of a create request.
///
/// A price that does not read as a number goes out as `null` and is left
/// for the server to reject.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CreateItemRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Option<f64>,
}

/// Text buffer behind the "Add New Item" form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ItemForm {
    pub fn to_request(&self) -> CreateItemRequest {
        CreateItemRequest {
            name: self.name.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            price: parse_price(&self.price),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Reads the price field of a number input, which is either a float
/// literal or empty.
pub fn parse_price(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_number_input_values() {
        assert_eq!(parse_price("9.99"), Some(9.99));
        assert_eq!(parse_price(" 1.5 "), Some(1.5));
        assert_eq!(parse_price(".5"), Some(0.5));
        assert_eq!(parse_price("1e3"), Some(1000.0));
        assert_eq!(parse_price("-2"), Some(-2.0));
    }

    #[test]
    fn non_numbers_read_as_nothing() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("12.5kg"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
    }

    #[test]
    fn request_coerces_price_and_drops_empty_description() {
        let form = ItemForm {
            name: "Pen".into(),
            description: String::new(),
            price: "1.5".into(),
        };

        let body = serde_json::to_value(form.to_request()).unwrap();
        assert_eq!(body, json!({"name": "Pen", "price": 1.5}));
    }

    #[test]
    fn request_sends_null_for_unreadable_price() {
        let form = ItemForm {
            name: "Pen".into(),
            description: "Blue".into(),
            price: "free".into(),
        };

        let body = serde_json::to_value(form.to_request()).unwrap();
        assert_eq!(body, json!({"name": "Pen", "description": "Blue", "price": null}));
    }

    #[test]
    fn price_label_has_two_decimals() {
        let item = Item {
            id: "1".into(),
            name: "Pen".into(),
            description: None,
            price: 1.5,
        };
        assert_eq!(item.price_label(), "$1.50");
    }

    #[test]
    fn clear_empties_every_field() {
        let mut form = ItemForm {
            name: "a".into(),
            description: "b".into(),
            price: "c".into(),
        };
        form.clear();
        assert_eq!(form, ItemForm::default());
    }
}
