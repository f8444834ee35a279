//! Page state and its transitions.
//!
//! Every mutation is followed by a fresh fetch; the list is never patched
//! locally. Failures overwrite a single error slot.

use crate::api::ApiError;
use crate::item::{Item, ItemForm};

pub const FETCH_FAILED: &str = "Failed to fetch items";
pub const CREATE_FAILED: &str = "Failed to create item";
pub const DELETE_FAILED: &str = "Failed to delete item";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemsState {
    pub items: Vec<Item>,
    pub form: ItemForm,
    pub loading: bool,
    pub error: Option<String>,
}

/// The part of the page state the item list renders from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListSnapshot {
    pub loading: bool,
    pub items: Vec<Item>,
}

impl ItemsState {
    pub fn list_snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            loading: self.loading,
            items: self.items.clone(),
        }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub fn finish_fetch(&mut self, result: Result<Vec<Item>, ApiError>) {
        match result {
            Ok(items) => self.items = items,
            Err(_) => self.error = Some(FETCH_FAILED.to_string()),
        }
        self.loading = false;
    }

    /// Returns whether the list should be re-fetched.
    pub fn finish_create(&mut self, result: Result<Item, ApiError>) -> bool {
        match result {
            Ok(_) => {
                self.form.clear();
                true
            }
            Err(_) => {
                self.error = Some(CREATE_FAILED.to_string());
                false
            }
        }
    }

    /// Returns whether the list should be re-fetched.
    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => true,
            Err(_) => {
                self.error = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }
}
