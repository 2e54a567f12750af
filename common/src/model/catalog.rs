//! Read-only lookup tables handed to views at construction.
//!
//! Both catalogs are loaded once and then shared between every view built
//! against them; nothing in the UI mutates them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::destination::Destination;
use crate::model::offer::Offer;

/// Offers grouped by point type.
///
/// Type order is significant: it is the order in which the type selector
/// lists the categories, so the map keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferCatalog(IndexMap<String, Vec<Offer>>);

impl OfferCatalog {
    pub fn new(offers: IndexMap<String, Vec<Offer>>) -> Self {
        Self(offers)
    }

    /// Every known point type, in catalog order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Offers available for `point_type`. Unknown types have none.
    pub fn offers_for(&self, point_type: &str) -> &[Offer] {
        self.0.get(point_type).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<Offer>)> for OfferCatalog {
    fn from_iter<I: IntoIterator<Item = (K, Vec<Offer>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Ordered list of known destinations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationCatalog(Vec<Destination>);

impl DestinationCatalog {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self(destinations)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.0.iter()
    }

    pub fn by_id(&self, id: &str) -> Option<&Destination> {
        self.0.iter().find(|destination| destination.id == id)
    }

    /// Exact, case-sensitive name lookup.
    pub fn by_name(&self, name: &str) -> Option<&Destination> {
        self.0.iter().find(|destination| destination.name == name)
    }
}

/// Both catalogs as they are shipped to the client in one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointCatalog {
    pub offers: OfferCatalog,
    pub destinations: DestinationCatalog,
}

impl PointCatalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
