use axum::{
    extract::{rejection::QueryRejection, Query},
    response::Response,
    routing::get,
    Router,
};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", get(get_trends))
}

/// Simulated market trends; no external data source is queried.
pub async fn get_trends(query: Result<Query<dto::TrendsQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::malformed_input(e),
    };

    let report = winnerlens_trends::simulate_trends(
        query.category.as_deref(),
        query.period.as_deref(),
        &mut rand::thread_rng(),
    );
    errors::ok(report)
}
