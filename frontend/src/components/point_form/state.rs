//! Editable state of the point form and its partial updates.

use chrono::{DateTime, Utc};
use common::model::destination::Destination;

use crate::framework::stateful::ViewState;

/// A point being edited.
///
/// Same fields as [`Point`](common::model::point::Point), plus the resolved
/// destination, which only exists for rendering and is dropped when the
/// state is turned back into a point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointState {
    /// Category key, one of the offer catalog's types.
    pub point_type: String,
    /// Start of the stop, shown as `DD/MM/YY HH:mm`.
    pub date_from: Option<DateTime<Utc>>,
    /// End of the stop.
    pub date_to: Option<DateTime<Utc>>,
    /// Destination id as stored. Kept even when the catalog does not know it.
    pub destination: Option<String>,
    /// The catalog entry `destination` resolves to, if any. Render-only.
    pub active_destination: Option<Destination>,
    /// Price before offers.
    pub base_price: Option<u32>,
    /// Ids of the selected offers of the current type.
    pub offers: Vec<String>,
}

/// Fields to overwrite in a [`PointState`]. `None` leaves a field alone;
/// nullable fields take `Some(None)` to be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointPatch {
    /// New category. Use [`PointPatch::switch_type`] to also clear the offers.
    pub point_type: Option<String>,
    pub date_from: Option<Option<DateTime<Utc>>>,
    pub date_to: Option<Option<DateTime<Utc>>>,
    /// New destination id; set together with `active_destination`.
    pub destination: Option<Option<String>>,
    /// Resolved catalog entry for `destination`.
    pub active_destination: Option<Option<Destination>>,
    pub base_price: Option<Option<u32>>,
    /// Replaces the whole selection.
    pub offers: Option<Vec<String>>,
}

impl PointPatch {
    /// Switches the category. Selected offers belong to the old category, so
    /// they are cleared in the same patch.
    pub fn switch_type(point_type: impl Into<String>) -> Self {
        Self {
            point_type: Some(point_type.into()),
            offers: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Points at `destination` and keeps the resolved record for rendering.
    pub fn destination(destination: &Destination) -> Self {
        Self {
            destination: Some(Some(destination.id.clone())),
            active_destination: Some(Some(destination.clone())),
            ..Self::default()
        }
    }
}

impl ViewState for PointState {
    type Patch = PointPatch;

    fn merge(&mut self, patch: PointPatch) {
        let PointPatch {
            point_type,
            date_from,
            date_to,
            destination,
            active_destination,
            base_price,
            offers,
        } = patch;

        if let Some(point_type) = point_type {
            self.point_type = point_type;
        }
        if let Some(date_from) = date_from {
            self.date_from = date_from;
        }
        if let Some(date_to) = date_to {
            self.date_to = date_to;
        }
        if let Some(destination) = destination {
            self.destination = destination;
        }
        if let Some(active_destination) = active_destination {
            self.active_destination = active_destination;
        }
        if let Some(base_price) = base_price {
            self.base_price = base_price;
        }
        if let Some(offers) = offers {
            self.offers = offers;
        }
    }
}
