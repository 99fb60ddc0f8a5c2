use super::domain::{Collaboration, ListingSnapshot};
use crate::identity::ListingId;

/// Source of collaborations attached to a listing.
pub trait CollaborationLookup: Send + Sync {
    fn collaborations_for(&self, listing_id: &ListingId)
        -> Result<Vec<Collaboration>, LookupError>;
}

/// Source of listing snapshots for detail rendering.
pub trait ListingCatalog: Send + Sync {
    fn fetch(&self, listing_id: &ListingId) -> Result<Option<ListingSnapshot>, LookupError>;
}

/// Failure reaching a listing or collaboration store.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("lookup unavailable: {0}")]
    Unavailable(String),
}
