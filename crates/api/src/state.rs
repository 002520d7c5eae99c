use std::sync::Arc;

use vitalrec_core::scorer::Scorer;

/// Handler state: the database pool and the scorer shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub pool: vitalrec_db::DbPool,
    pub scorer: Arc<Scorer>,
}
