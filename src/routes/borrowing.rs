//! Borrowing route definitions

use axum::{routing::get, Router};

use crate::handlers::*;
use crate::state::AppState;

/// Borrowing routes mounted under `prefix`
///
/// ```text
/// GET    {prefix}/                   list
/// POST   {prefix}/                   create
/// GET    {prefix}/:borrowing_id/     fetch
/// PUT    {prefix}/:borrowing_id/     full update
/// PATCH  {prefix}/:borrowing_id/     partial update
/// DELETE {prefix}/:borrowing_id/     delete
/// ```
pub fn borrowing_routes(prefix: &str) -> Router<AppState> {
    let prefix = normalize_prefix(prefix);

    Router::new()
        .route(
            &format!("{}/", prefix),
            get(list_borrowings).post(create_borrowing),
        )
        .route(
            &format!("{}/:borrowing_id/", prefix),
            get(get_borrowing)
                .put(update_borrowing)
                .patch(update_borrowing_partial)
                .delete(delete_borrowing),
        )
}

/// Leading slash, no trailing slash; the root prefix becomes empty
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_prefix;

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/api/v1/borrowings"), "/api/v1/borrowings");
        assert_eq!(normalize_prefix("api/v1/borrowings/"), "/api/v1/borrowings");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }
}
