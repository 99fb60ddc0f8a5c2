//! Collaboration-gated disclosure of listing addresses.

pub mod domain;
mod policy;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Collaboration, CollaborationStatus, DisclosedAddress, ListingAddress, ListingSnapshot,
};
pub use policy::{can_view_full_address, display_address, AddressDisclosurePolicy, HIDDEN_LOCATION};
pub use repository::{CollaborationLookup, ListingCatalog, LookupError};
pub use router::listing_router;
pub use service::{DisclosureError, ListingDisclosureService, ListingView};
