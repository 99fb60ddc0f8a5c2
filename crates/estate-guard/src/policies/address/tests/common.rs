use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::identity::{ListingId, UserId};
use crate::policies::address::domain::{
    Collaboration, CollaborationStatus, ListingAddress, ListingSnapshot,
};
use crate::policies::address::repository::{CollaborationLookup, ListingCatalog, LookupError};
use crate::policies::address::service::ListingDisclosureService;
use crate::rich_text::{RichTextDocument, RichTextNode};

pub(super) fn owner() -> UserId {
    UserId::new("owner-1")
}

pub(super) fn collab(collaborator: &str, status: CollaborationStatus) -> Collaboration {
    Collaboration {
        collaborator_id: UserId::new(collaborator),
        status,
    }
}

pub(super) fn paris_address() -> ListingAddress {
    ListingAddress {
        address: Some("12 Rue A".to_string()),
        city: Some("Paris".to_string()),
        postal_code: Some("75001".to_string()),
    }
}

pub(super) fn listing() -> ListingSnapshot {
    ListingSnapshot {
        listing_id: ListingId::new("listing-7"),
        owner_id: owner(),
        title: "Two-bedroom near Louvre".to_string(),
        address: paris_address(),
        description: Some(RichTextDocument::new(vec![RichTextNode::container(vec![
            RichTextNode::text("Renovated "),
            RichTextNode::text("in 2023."),
        ])])),
    }
}

#[derive(Default)]
pub(super) struct MemoryCollaborations {
    pub(super) by_listing: Mutex<HashMap<ListingId, Vec<Collaboration>>>,
    pub(super) calls: Mutex<usize>,
}

impl MemoryCollaborations {
    pub(super) fn with(listing_id: &ListingId, collaborations: Vec<Collaboration>) -> Self {
        let lookup = Self::default();
        lookup
            .by_listing
            .lock()
            .expect("lookup mutex poisoned")
            .insert(listing_id.clone(), collaborations);
        lookup
    }

    pub(super) fn call_count(&self) -> usize {
        *self.calls.lock().expect("lookup mutex poisoned")
    }
}

impl CollaborationLookup for MemoryCollaborations {
    fn collaborations_for(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Collaboration>, LookupError> {
        *self.calls.lock().expect("lookup mutex poisoned") += 1;
        Ok(self
            .by_listing
            .lock()
            .expect("lookup mutex poisoned")
            .get(listing_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub(super) struct OfflineCollaborations;

impl CollaborationLookup for OfflineCollaborations {
    fn collaborations_for(
        &self,
        _listing_id: &ListingId,
    ) -> Result<Vec<Collaboration>, LookupError> {
        Err(LookupError::Unavailable("collaboration store offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    pub(super) listings: HashMap<ListingId, ListingSnapshot>,
}

impl MemoryCatalog {
    pub(super) fn with(listing: ListingSnapshot) -> Self {
        let mut listings = HashMap::new();
        listings.insert(listing.listing_id.clone(), listing);
        Self { listings }
    }
}

impl ListingCatalog for MemoryCatalog {
    fn fetch(&self, listing_id: &ListingId) -> Result<Option<ListingSnapshot>, LookupError> {
        Ok(self.listings.get(listing_id).cloned())
    }
}

pub(super) fn build_service(
    collaborations: Vec<Collaboration>,
) -> (
    ListingDisclosureService<MemoryCatalog, MemoryCollaborations>,
    Arc<MemoryCollaborations>,
) {
    let listing = listing();
    let lookup = Arc::new(MemoryCollaborations::with(
        &listing.listing_id,
        collaborations,
    ));
    let service = ListingDisclosureService::new(Arc::new(MemoryCatalog::with(listing)), lookup.clone());
    (service, lookup)
}
