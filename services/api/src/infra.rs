use estate_guard::identity::{ListingId, UserId};
use estate_guard::policies::address::{
    Collaboration, CollaborationLookup, CollaborationStatus, ListingAddress, ListingCatalog,
    ListingSnapshot, LookupError,
};
use estate_guard::policies::password_history::{
    CredentialRecord, CredentialRepository, RepositoryError,
};
use estate_guard::rich_text::{RichTextDocument, RichTextNode};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCredentialRepository {
    records: Arc<Mutex<HashMap<UserId, CredentialRecord>>>,
}

impl CredentialRepository for InMemoryCredentialRepository {
    fn insert(&self, record: CredentialRecord) -> Result<CredentialRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.user_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.user_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<CredentialRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn replace(
        &self,
        record: CredentialRecord,
        expected_version: u64,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let found = guard
            .get(&record.user_id)
            .map(|current| current.version)
            .ok_or(RepositoryError::NotFound)?;
        if found != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                found,
            });
        }
        guard.insert(record.user_id.clone(), record);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingCatalog {
    listings: Arc<Mutex<HashMap<ListingId, ListingSnapshot>>>,
}

impl InMemoryListingCatalog {
    pub(crate) fn insert(&self, listing: ListingSnapshot) {
        self.listings
            .lock()
            .expect("catalog mutex poisoned")
            .insert(listing.listing_id.clone(), listing);
    }
}

impl ListingCatalog for InMemoryListingCatalog {
    fn fetch(&self, listing_id: &ListingId) -> Result<Option<ListingSnapshot>, LookupError> {
        let guard = self.listings.lock().expect("catalog mutex poisoned");
        Ok(guard.get(listing_id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCollaborations {
    by_listing: Arc<Mutex<HashMap<ListingId, Vec<Collaboration>>>>,
}

impl InMemoryCollaborations {
    pub(crate) fn record(&self, listing_id: &ListingId, collaboration: Collaboration) {
        self.by_listing
            .lock()
            .expect("collaboration mutex poisoned")
            .entry(listing_id.clone())
            .or_default()
            .push(collaboration);
    }
}

impl CollaborationLookup for InMemoryCollaborations {
    fn collaborations_for(
        &self,
        listing_id: &ListingId,
    ) -> Result<Vec<Collaboration>, LookupError> {
        let guard = self
            .by_listing
            .lock()
            .expect("collaboration mutex poisoned");
        Ok(guard.get(listing_id).cloned().unwrap_or_default())
    }
}

/// Sample listing shared by `serve` and `demo`: one owner, an active and a pending collaborator.
pub(crate) fn seed_listings() -> (InMemoryListingCatalog, InMemoryCollaborations) {
    let catalog = InMemoryListingCatalog::default();
    let collaborations = InMemoryCollaborations::default();
    let listing_id = ListingId::new("listing-marais-01");

    catalog.insert(ListingSnapshot {
        listing_id: listing_id.clone(),
        owner_id: UserId::new("agent-claire"),
        title: "Three-room apartment in the Marais".to_string(),
        address: ListingAddress {
            address: Some("12 Rue des Archives".to_string()),
            city: Some("Paris".to_string()),
            postal_code: Some("75004".to_string()),
        },
        description: Some(RichTextDocument::new(vec![
            RichTextNode::container(vec![
                RichTextNode::text("Fourth floor with lift, "),
                RichTextNode::text("south-facing balcony."),
            ]),
            RichTextNode::container(vec![RichTextNode::text(
                "Co-listing open to partner agencies.",
            )]),
        ])),
    });

    collaborations.record(
        &listing_id,
        Collaboration {
            collaborator_id: UserId::new("agent-malik"),
            status: CollaborationStatus::Active,
        },
    );
    collaborations.record(
        &listing_id,
        Collaboration {
            collaborator_id: UserId::new("agent-sofia"),
            status: CollaborationStatus::Pending,
        },
    );

    (catalog, collaborations)
}
