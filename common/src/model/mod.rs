pub mod catalog;
pub mod destination;
pub mod offer;
pub mod point;
