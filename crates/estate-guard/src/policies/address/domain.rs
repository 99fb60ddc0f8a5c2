use serde::{Deserialize, Serialize};

use crate::identity::{ListingId, UserId};
use crate::rich_text::RichTextDocument;

/// Lifecycle stage of a collaboration on a listing.
///
/// Unrecognised statuses deserialize to `Unknown` and never grant access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CollaborationStatus {
    Pending,
    Accepted,
    Active,
    Completed,
    Cancelled,
    Unknown(String),
}

impl CollaborationStatus {
    /// Exact lowercase labels only; anything else, including padded or capitalised
    /// variants, becomes `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "active" => Self::Active,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CollaborationStatus::Pending => "pending",
            CollaborationStatus::Accepted => "accepted",
            CollaborationStatus::Active => "active",
            CollaborationStatus::Completed => "completed",
            CollaborationStatus::Cancelled => "cancelled",
            CollaborationStatus::Unknown(raw) => raw.as_str(),
        }
    }

    /// Accepted, active, and completed collaborations unlock the precise address.
    pub const fn grants_address_access(&self) -> bool {
        matches!(
            self,
            CollaborationStatus::Accepted
                | CollaborationStatus::Active
                | CollaborationStatus::Completed
        )
    }
}

impl From<String> for CollaborationStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CollaborationStatus> for String {
    fn from(status: CollaborationStatus) -> Self {
        status.label().to_string()
    }
}

/// Collaboration granted to a non-owner on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
    pub collaborator_id: UserId,
    pub status: CollaborationStatus,
}

/// Address fields as captured on the listing; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingAddress {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Listing data needed to render its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub listing_id: ListingId,
    pub owner_id: UserId,
    pub title: String,
    pub address: ListingAddress,
    #[serde(default)]
    pub description: Option<RichTextDocument>,
}

/// Outcome of the disclosure pipeline: the gate decision and the matching rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosedAddress {
    pub full_address: bool,
    pub display: String,
}
