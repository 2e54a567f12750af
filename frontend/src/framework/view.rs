use std::cell::RefCell;

use super::dom::Dom;
use super::error::ViewError;

/// Anything the render utility can place on the page.
pub trait View<D: Dom> {
    fn dom(&self) -> &D;

    /// Markup for the view as it currently stands.
    fn markup(&self) -> String;

    /// The root element, built from [`markup`](View::markup) on first access
    /// and returned unchanged afterwards.
    fn element(&self) -> Result<D::Element, ViewError>;
}

/// Markup that depends on nothing but the template itself.
pub trait Template {
    fn markup(&self) -> String;
}

/// A view with no state and no handlers.
pub struct StaticView<T, D: Dom> {
    dom: D,
    template: T,
    element: RefCell<Option<D::Element>>,
}

impl<T: Template, D: Dom> StaticView<T, D> {
    pub fn new(dom: D, template: T) -> Self {
        Self {
            dom,
            template,
            element: RefCell::new(None),
        }
    }
}

impl<T: Template, D: Dom> View<D> for StaticView<T, D> {
    fn dom(&self) -> &D {
        &self.dom
    }

    fn markup(&self) -> String {
        self.template.markup()
    }

    fn element(&self) -> Result<D::Element, ViewError> {
        let mut cached = self.element.borrow_mut();
        if let Some(element) = cached.as_ref() {
            return Ok(element.clone());
        }
        let element = self.dom.parse_fragment(&self.template.markup())?;
        *cached = Some(element.clone());
        Ok(element)
    }
}
