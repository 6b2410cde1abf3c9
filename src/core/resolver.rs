use crate::core::catalog::Catalog;
use crate::models::NeighborhoodRecord;

/// Resolve a free-text address to a catalog neighborhood
///
/// Returns the first record, in catalog order, that owns a representative
/// address contained (case-insensitively) in `query`. Empty or blank queries
/// never match. When several records could match an ambiguous query the first
/// one wins.
pub fn resolve_address<'a>(query: &str, catalog: &'a Catalog) -> Option<&'a NeighborhoodRecord> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let needle = query.to_lowercase();
    let found = catalog.records().iter().find(|record| {
        record
            .addresses
            .iter()
            .any(|address| needle.contains(&address.to_lowercase()))
    });

    match found {
        Some(record) => tracing::debug!("Resolved '{}' to {}", query, record.name),
        None => tracing::debug!("No neighborhood matched '{}'", query),
    }

    found
}

impl Catalog {
    pub fn resolve(&self, query: &str) -> Option<&NeighborhoodRecord> {
        resolve_address(query, self)
    }
}
