use axum::extract::State;

use crate::services::record_number_generated;
use crate::startup::AppState;

/// `GET /api/numbers/random`: one uniform draw from `[1, 100]` as a bare integer body.
pub async fn random_number(State(state): State<AppState>) -> String {
    let number = state.random.next_number();
    record_number_generated();
    tracing::debug!(number, "Generated random number");
    number.to_string()
}
