use crate::lookup::Lookup;

/// Shared application state, cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Lookup,
}

impl AppState {
    pub fn new(lookup: Lookup) -> Self {
        Self { lookup }
    }
}
