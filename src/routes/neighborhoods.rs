use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::config::ReviewSettings;
use crate::core::{aggregator, Catalog, InsightScorer, ReviewSynthesizer};
use crate::models::{
    AddressRequest, CompareQuery, ErrorResponse, FeaturesResponse, HealthResponse,
    ListNeighborhoodsQuery, ListNeighborhoodsResponse, NeighborhoodRecord, NeighborhoodSummary,
    PriceRange, ResolveResponse, ReviewsQuery, ReviewsResponse, SortKey,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub scorer: InsightScorer,
    pub reviews: ReviewSettings,
}

impl AppState {
    pub fn new(catalog: Catalog, scorer: InsightScorer, reviews: ReviewSettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            scorer,
            reviews,
        }
    }
}

/// Configure all neighborhood routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/neighborhoods", web::get().to(list_neighborhoods))
        .route("/neighborhoods/features", web::get().to(list_features))
        .route("/neighborhoods/{name}", web::get().to(get_neighborhood))
        .route("/neighborhoods/{name}/reviews", web::get().to(get_reviews))
        .route("/resolve", web::post().to(resolve))
        .route("/compare", web::get().to(compare));
}

pub(crate) fn summarize(record: &NeighborhoodRecord) -> NeighborhoodSummary {
    NeighborhoodSummary {
        record: record.clone(),
        overall_score: aggregator::overall_score(record),
    }
}

pub(crate) fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

pub(crate) fn not_found(error: &str, message: String) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 404,
    })
}

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        neighborhoods: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// List neighborhoods
///
/// GET /api/v1/neighborhoods?minPrice=0&maxPrice=3000000&features=a,b&sortBy=safety
async fn list_neighborhoods(
    state: web::Data<AppState>,
    query: web::Query<ListNeighborhoodsQuery>,
) -> impl Responder {
    let sort_by = match query.sort_by.as_deref() {
        Some(raw) => match raw.parse::<SortKey>() {
            Ok(key) => key,
            Err(e) => return bad_request("Invalid sort key", e),
        },
        None => SortKey::default(),
    };

    let defaults = PriceRange::default();
    let price_range = PriceRange::new(
        query.min_price.unwrap_or(defaults.min),
        query.max_price.unwrap_or(defaults.max),
    );
    let features = query.required_features();

    let records = aggregator::aggregate_and_filter(&state.catalog, price_range, &features, sort_by);
    let neighborhoods: Vec<NeighborhoodSummary> = records.into_iter().map(summarize).collect();

    tracing::info!(
        "Listing {} neighborhoods (sort by {}, {} required features)",
        neighborhoods.len(),
        sort_by,
        features.len()
    );

    HttpResponse::Ok().json(ListNeighborhoodsResponse {
        total_results: neighborhoods.len(),
        neighborhoods,
        sort_by,
    })
}

/// Feature vocabulary for filter chips
async fn list_features(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(FeaturesResponse {
        features: state.catalog.feature_vocabulary(),
    })
}

/// Single neighborhood by name
async fn get_neighborhood(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let name = path.into_inner();
    match state.catalog.get(&name) {
        Some(record) => HttpResponse::Ok().json(summarize(record)),
        None => not_found("Neighborhood not found", format!("No neighborhood named '{}'", name)),
    }
}

/// Synthesized reviews for a neighborhood
///
/// GET /api/v1/neighborhoods/{name}/reviews?count=2
///
/// Unknown names are not an error; they get reviews from the default profile.
async fn get_reviews(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ReviewsQuery>,
) -> impl Responder {
    let requested = path.into_inner();
    let name = state
        .catalog
        .get(&requested)
        .map(|r| r.name.clone())
        .unwrap_or(requested);

    let count = query
        .count
        .unwrap_or(state.reviews.default_count)
        .min(state.reviews.max_count) as usize;

    let synthesizer = ReviewSynthesizer::new(&state.catalog);
    let average_rating = synthesizer.profile_for(&name).avg_rating;
    let reviews = synthesizer.generate(&name, count, &mut rand::rng());

    tracing::debug!("Synthesized {} reviews for {}", reviews.len(), name);

    HttpResponse::Ok().json(ReviewsResponse {
        neighborhood: name,
        average_rating,
        reviews,
    })
}

/// Resolve an address to a neighborhood
///
/// POST /api/v1/resolve
///
/// A miss is informational, not an error: the response says so and the
/// client falls back to showing every neighborhood.
async fn resolve(
    state: web::Data<AppState>,
    req: web::Json<AddressRequest>,
) -> impl Responder {
    let req = req.into_inner().trimmed();
    if let Err(errors) = req.validate() {
        return bad_request("Address is required", errors.to_string());
    }

    let response = match state.catalog.resolve(&req.address) {
        Some(record) => {
            tracing::info!("Resolved address to {}", record.name);
            ResolveResponse {
                found: true,
                message: format!("Found your neighborhood: {}", record.name),
                neighborhood: Some(summarize(record)),
            }
        }
        None => {
            tracing::info!("No neighborhood matched address '{}'", req.address);
            ResolveResponse {
                found: false,
                neighborhood: None,
                message: "Could not find a matching neighborhood. Showing all neighborhoods instead."
                    .to_string(),
            }
        }
    };

    HttpResponse::Ok().json(response)
}

/// Compare two neighborhoods side by side
///
/// GET /api/v1/compare?first=Mission%20District&second=Noe%20Valley
async fn compare(
    state: web::Data<AppState>,
    query: web::Query<CompareQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let (first, second) = match (state.catalog.get(&query.first), state.catalog.get(&query.second)) {
        (Some(a), Some(b)) => (a, b),
        (None, _) => return not_found("Neighborhood not found", format!("No neighborhood named '{}'", query.first)),
        (_, None) => return not_found("Neighborhood not found", format!("No neighborhood named '{}'", query.second)),
    };

    HttpResponse::Ok().json(aggregator::compare(first, second))
}
