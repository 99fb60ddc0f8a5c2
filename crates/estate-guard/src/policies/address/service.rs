use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::{DisclosedAddress, ListingSnapshot};
use super::policy::AddressDisclosurePolicy;
use super::repository::{CollaborationLookup, ListingCatalog, LookupError};
use crate::identity::{ListingId, UserId};

const DESCRIPTION_EXCERPT_CHARS: usize = 280;

/// Listing detail as returned to a specific viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingView {
    pub listing_id: ListingId,
    pub title: String,
    pub location: DisclosedAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Service resolving listings and collaborations before running the disclosure policy.
pub struct ListingDisclosureService<C, L> {
    catalog: Arc<C>,
    lookup: Arc<L>,
    policy: AddressDisclosurePolicy,
}

impl<C, L> ListingDisclosureService<C, L>
where
    C: ListingCatalog + 'static,
    L: CollaborationLookup + 'static,
{
    pub fn new(catalog: Arc<C>, lookup: Arc<L>) -> Self {
        Self {
            catalog,
            lookup,
            policy: AddressDisclosurePolicy,
        }
    }

    /// Decide and render the address of `listing` for `viewer_id`.
    ///
    /// Collaborations are only looked up for signed-in non-owners.
    pub fn disclose(
        &self,
        listing: &ListingSnapshot,
        viewer_id: Option<&UserId>,
    ) -> Result<DisclosedAddress, DisclosureError> {
        let is_owner = viewer_id == Some(&listing.owner_id);
        let collaborations = match viewer_id {
            Some(_) if !is_owner => self.lookup.collaborations_for(&listing.listing_id)?,
            _ => Vec::new(),
        };

        let disclosed = self
            .policy
            .disclose(is_owner, &collaborations, viewer_id, &listing.address);

        debug!(
            listing_id = %listing.listing_id,
            is_owner,
            collaborations = collaborations.len(),
            full_address = disclosed.full_address,
            "address disclosure evaluated"
        );
        Ok(disclosed)
    }

    /// Fetch a listing and build the viewer-specific detail view.
    pub fn view(
        &self,
        listing_id: &ListingId,
        viewer_id: Option<&UserId>,
    ) -> Result<ListingView, DisclosureError> {
        let listing = self
            .catalog
            .fetch(listing_id)?
            .ok_or_else(|| DisclosureError::ListingNotFound(listing_id.clone()))?;

        let location = self.disclose(&listing, viewer_id)?;
        let description = listing
            .description
            .as_ref()
            .map(|document| document.excerpt(DESCRIPTION_EXCERPT_CHARS))
            .filter(|text| !text.is_empty());

        Ok(ListingView {
            listing_id: listing.listing_id,
            title: listing.title,
            location,
            description,
        })
    }
}

/// Error raised by the disclosure service.
#[derive(Debug, thiserror::Error)]
pub enum DisclosureError {
    #[error("listing {0} not found")]
    ListingNotFound(ListingId),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
