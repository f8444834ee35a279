use crate::store::ItemStore;

/// State handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub store: ItemStore,
}

impl AppState {
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }
}
