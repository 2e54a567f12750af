use thiserror::Error;

/// Failures raised by a [`Dom`](super::dom::Dom) host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("malformed markup: {0}")]
    Markup(String),

    /// A view's markup must describe exactly one root element.
    #[error("markup produced {0} root elements, expected exactly one")]
    FragmentRoots(usize),

    #[error("element has no parent to insert relative to")]
    NotAttached,

    #[error("host error: {0}")]
    Host(String),
}

/// Errors surfaced by the render utility and by views.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The render target does not exist.
    #[error("render container does not exist")]
    InvalidContainer,

    /// An update was requested before the view was ever inserted into a container.
    #[error("view has not been rendered into a container")]
    DetachedView,

    /// Interactive lookup of a referenced record by name found nothing.
    #[error("no destination named `{0}`")]
    UnknownReference(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}
