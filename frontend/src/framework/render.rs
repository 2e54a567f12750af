use log::debug;

use super::dom::Dom;
use super::error::ViewError;
use super::view::View;

/// Where an element goes relative to the render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPosition {
    BeforeBegin,
    AfterBegin,
    BeforeEnd,
    AfterEnd,
}

impl RenderPosition {
    /// The keyword `insertAdjacentElement` expects.
    pub fn as_str(self) -> &'static str {
        match self {
            RenderPosition::BeforeBegin => "beforebegin",
            RenderPosition::AfterBegin => "afterbegin",
            RenderPosition::BeforeEnd => "beforeend",
            RenderPosition::AfterEnd => "afterend",
        }
    }
}

/// Inserts the view's root element into `container` at `position`.
///
/// Exactly one element is inserted per call. Nothing is removed or tracked;
/// keeping the page tidy is up to the caller.
pub fn render<D, V>(view: &V, container: Option<&D::Element>, position: RenderPosition) -> Result<(), ViewError>
where
    D: Dom,
    V: View<D> + ?Sized,
{
    let container = container.ok_or(ViewError::InvalidContainer)?;
    let element = view.element()?;
    view.dom().insert_adjacent(container, position, &element)?;
    debug!("rendered view at {}", position.as_str());
    Ok(())
}
