use super::domain::{Collaboration, DisclosedAddress, ListingAddress};
use crate::identity::UserId;

/// Rendering used whenever disclosure is denied and no city is known.
pub const HIDDEN_LOCATION: &str = "Location hidden";

/// Whether the viewer may see the precise address of a listing.
///
/// Owners always may. Anyone else needs a collaboration on the listing in a granting
/// status; anonymous viewers never qualify.
pub fn can_view_full_address(
    is_owner: bool,
    collaborations: &[Collaboration],
    viewer_id: Option<&UserId>,
) -> bool {
    if is_owner {
        return true;
    }

    let Some(viewer_id) = viewer_id else {
        return false;
    };

    collaborations.iter().any(|collaboration| {
        &collaboration.collaborator_id == viewer_id
            && collaboration.status.grants_address_access()
    })
}

/// Render the address for a viewer given the gate decision.
///
/// Parts are trimmed, and blank parts are dropped, before joining with `", "`. A denied
/// viewer gets the trimmed city, or [`HIDDEN_LOCATION`] when there is none.
///
/// Prefer [`AddressDisclosurePolicy::disclose`], which keeps the decision and the rendering
/// together.
pub fn display_address(
    can_view: bool,
    address: Option<&str>,
    city: Option<&str>,
    postal_code: Option<&str>,
) -> String {
    let city = non_blank(city);

    if !can_view {
        return city.unwrap_or(HIDDEN_LOCATION).to_string();
    }

    [non_blank(address), city, non_blank(postal_code)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_blank(part: Option<&str>) -> Option<&str> {
    part.map(str::trim).filter(|value| !value.is_empty())
}

/// Single entry point combining the gate and the rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressDisclosurePolicy;

impl AddressDisclosurePolicy {
    pub fn disclose(
        &self,
        is_owner: bool,
        collaborations: &[Collaboration],
        viewer_id: Option<&UserId>,
        address: &ListingAddress,
    ) -> DisclosedAddress {
        let full_address = can_view_full_address(is_owner, collaborations, viewer_id);
        let display = display_address(
            full_address,
            address.address.as_deref(),
            address.city.as_deref(),
            address.postal_code.as_deref(),
        );

        DisclosedAddress {
            full_address,
            display,
        }
    }
}
