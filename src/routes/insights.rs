use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::AddressRequest;
use crate::routes::neighborhoods::{bad_request, not_found, AppState};

/// Insights report for an address
///
/// POST /insights
///
/// Request body:
/// ```json
/// { "address": "123 Valencia St, San Francisco, CA" }
/// ```
pub async fn get_insights(
    state: web::Data<AppState>,
    req: web::Json<AddressRequest>,
) -> impl Responder {
    let req = req.into_inner().trimmed();
    if let Err(errors) = req.validate() {
        return bad_request("Address is required", errors.to_string());
    }
    let address = req.address.as_str();

    let record = match state.catalog.resolve(address) {
        Some(record) => record,
        None => {
            tracing::info!("Insights requested for unknown address '{}'", address);
            return not_found(
                "Neighborhood not found",
                format!("Could not find a matching neighborhood for '{}'", address),
            );
        }
    };

    let report = state
        .scorer
        .report(address, record, &state.catalog, &mut rand::rng());

    tracing::info!(
        "Insights for {} resolved to {} (overall {})",
        address,
        report.neighborhood,
        report.ml_insights.overall_score
    );

    HttpResponse::Ok().json(report)
}
