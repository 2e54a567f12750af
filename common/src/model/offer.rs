use serde::{Deserialize, Serialize};

/// An add-on that can be booked together with a point of a given type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub price: u32,
}
