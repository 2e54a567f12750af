//! View plumbing shared by every component: the DOM seam, the render
//! utility and the stateful view lifecycle.

pub mod dom;
pub mod error;
pub mod render;
pub mod stateful;
pub mod view;
