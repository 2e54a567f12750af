use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stop of a trip as it is persisted by the storage layer.
///
/// The destination is kept as an identifier into a [`DestinationCatalog`];
/// views resolve it on their own when they need the full record.
///
/// [`DestinationCatalog`]: crate::model::catalog::DestinationCatalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Category of the stop (`taxi`, `bus`, `check-in`, ...). Selects the
    /// offer list and the icon.
    #[serde(rename = "type")]
    pub point_type: String,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    /// Identifier of the destination, if one was chosen.
    pub destination: Option<String>,
    pub base_price: Option<u32>,
    /// Identifiers of the selected offers, in selection order.
    #[serde(default)]
    pub offers: Vec<String>,
}

impl Point {
    /// A point with nothing filled in but its category.
    pub fn blank(point_type: impl Into<String>) -> Self {
        Self {
            point_type: point_type.into(),
            date_from: None,
            date_to: None,
            destination: None,
            base_price: None,
            offers: Vec::new(),
        }
    }
}
