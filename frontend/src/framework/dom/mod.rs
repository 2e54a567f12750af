//! The seam between views and the page.
//!
//! Views never touch a document directly: they produce markup and let a
//! [`Dom`] host materialize, place and wire it. [`MemoryDom`] is an
//! in-process document used by tests and the native preview; [`WebDom`]
//! drives the browser through `web-sys`.

use std::cell::{Cell, RefCell};
use std::fmt;

use super::error::DomError;
use super::render::RenderPosition;

pub mod memory;
mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::{MemoryDom, MemoryListener, NodeId};
#[cfg(target_arch = "wasm32")]
pub use web::WebDom;

/// Interaction kinds the views subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Submit,
    Click,
    Change,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Submit => "submit",
            EventKind::Click => "click",
            EventKind::Change => "change",
        }
    }
}

/// Host-neutral view of a dispatched event.
///
/// Handlers receive it by shared reference; the host reads the flags back
/// once the handler returns.
pub struct DomEvent {
    value: Option<String>,
    default_prevented: Cell<bool>,
    rejection: RefCell<Option<String>>,
}

impl DomEvent {
    pub fn new(value: Option<String>) -> Self {
        Self {
            value,
            default_prevented: Cell::new(false),
            rejection: RefCell::new(None),
        }
    }

    /// Current value of the event target, for form controls.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Marks the input that triggered the event as invalid.
    pub fn reject(&self, reason: impl Into<String>) {
        *self.rejection.borrow_mut() = Some(reason.into());
    }

    pub fn rejection(&self) -> Option<String> {
        self.rejection.borrow().clone()
    }
}

impl fmt::Debug for DomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomEvent")
            .field("value", &self.value)
            .field("default_prevented", &self.default_prevented.get())
            .field("rejection", &self.rejection.borrow())
            .finish()
    }
}

/// A document the views can render into.
///
/// Handles are cheap to clone and all clones refer to the same document.
pub trait Dom: Clone + 'static {
    /// Element handle. Equality is identity.
    type Element: Clone + PartialEq + fmt::Debug + 'static;

    /// Keeps a listener bound for as long as it is alive.
    type Listener: 'static;

    /// Builds a detached element from a fragment holding exactly one root.
    fn parse_fragment(&self, markup: &str) -> Result<Self::Element, DomError>;

    /// Inserts `element` relative to `target`, moving it if it is already placed.
    fn insert_adjacent(
        &self,
        target: &Self::Element,
        position: RenderPosition,
        element: &Self::Element,
    ) -> Result<(), DomError>;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Puts `new` in the exact slot `old` occupies and detaches `old`.
    fn replace_with(&self, old: &Self::Element, new: &Self::Element) -> Result<(), DomError>;

    /// First descendant of `root` matching `selector`. `root` itself is not considered.
    fn query_selector(&self, root: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn query_selector_all(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn listen<F>(&self, element: &Self::Element, kind: EventKind, handler: F) -> Self::Listener
    where
        F: Fn(&DomEvent) + 'static;
}
