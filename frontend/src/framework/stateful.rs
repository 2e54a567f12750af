//! Views that keep local state and redraw themselves from it.
//!
//! A concrete view is split into three capabilities:
//!
//! - [`ViewState`]: the in-progress record and how partial updates merge into it;
//! - [`MarkupProducer`]: a pure function from state to markup;
//! - [`HandlerBinder`]: wiring of interaction handlers onto a freshly built root.
//!
//! [`StatefulView`] owns the state, the live root element and the listener
//! guards, and runs the update sequence: merge, rebuild markup, swap the root
//! in place, drop the old listeners, bind new ones. The swap is a full
//! replace, never a patch.
//!
//! Handlers reach their view through a [`ViewScope`], which holds only a weak
//! reference: a view dropped by its presenter takes its listeners with it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::debug;

use super::dom::Dom;
use super::error::ViewError;
use super::view::View;

/// The editable record a view works on.
pub trait ViewState: Clone + 'static {
    /// Partial update; fields left unset keep their current value.
    type Patch;

    fn merge(&mut self, patch: Self::Patch);
}

pub trait MarkupProducer: 'static {
    type State: ViewState;

    /// Must not mutate anything; the same state always gives the same markup.
    fn markup(&self, state: &Self::State) -> String;
}

pub trait HandlerBinder<D: Dom>: MarkupProducer + Sized {
    /// Binds every handler the view needs below `root` and returns the guards.
    ///
    /// Called once per root element, right after it is built.
    fn attach_handlers(scope: &ViewScope<Self, D>, dom: &D, root: &D::Element) -> Vec<D::Listener>;
}

/// Conversion between the persisted record and a view's editable state.
pub trait StateTranslator: MarkupProducer {
    type Record;

    fn to_state(&self, record: Self::Record) -> Self::State;

    fn to_record(&self, state: &Self::State) -> Self::Record;
}

struct Inner<V: MarkupProducer, D: Dom> {
    view: V,
    /// Committed state; only replaced once a redraw has fully succeeded.
    state: V::State,
    /// Current root. `None` until first requested.
    element: Option<D::Element>,
    /// Guards for the handlers bound below `element`.
    listeners: Vec<D::Listener>,
}

/// What clones of a view and its scopes point at. The dom handle sits
/// outside the `RefCell` so [`View::dom`] can lend it out.
struct Shared<V: MarkupProducer, D: Dom> {
    dom: D,
    inner: RefCell<Inner<V, D>>,
}

/// Shared handle to a stateful view. Clones refer to the same view.
pub struct StatefulView<V: MarkupProducer, D: Dom> {
    shared: Rc<Shared<V, D>>,
}

impl<V: MarkupProducer, D: Dom> Clone for StatefulView<V, D> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

/// Weak handle given to handlers.
pub struct ViewScope<V: MarkupProducer, D: Dom> {
    shared: Weak<Shared<V, D>>,
}

impl<V: MarkupProducer, D: Dom> Clone for ViewScope<V, D> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<V: MarkupProducer, D: Dom> ViewScope<V, D> {
    /// `None` once the view has been discarded.
    pub fn upgrade(&self) -> Option<StatefulView<V, D>> {
        self.shared.upgrade().map(|shared| StatefulView { shared })
    }
}

impl<V: HandlerBinder<D>, D: Dom> StatefulView<V, D> {
    pub fn new(dom: D, view: V, state: V::State) -> Self {
        Self {
            shared: Rc::new(Shared {
                dom,
                inner: RefCell::new(Inner {
                    view,
                    state,
                    element: None,
                    listeners: Vec::new(),
                }),
            }),
        }
    }

    fn scope(&self) -> ViewScope<V, D> {
        ViewScope {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Drops the current guards and binds fresh handlers below `root`.
    fn bind(&self, inner: &mut Inner<V, D>, root: &D::Element) {
        inner.listeners.clear();
        inner.listeners = V::attach_handlers(&self.scope(), &self.shared.dom, root);
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> V::State {
        self.shared.inner.borrow().state.clone()
    }

    /// Read access to the view's own fields.
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.shared.inner.borrow().view)
    }

    pub(crate) fn with_view_mut<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.shared.inner.borrow_mut().view)
    }

    /// Whether the root element exists and sits inside a container.
    pub fn is_rendered(&self) -> bool {
        let inner = self.shared.inner.borrow();
        match &inner.element {
            Some(element) => self.shared.dom.parent(element).is_some(),
            None => false,
        }
    }

    /// Merges `patch` into the state and redraws.
    ///
    /// The old root is replaced in place by one built from the merged state,
    /// and handlers are bound to the new root before this returns. On error
    /// nothing changes: the old state, element and handlers stay as they were.
    pub fn update_state(&self, patch: <V::State as ViewState>::Patch) -> Result<(), ViewError> {
        let dom = &self.shared.dom;
        let mut inner = self.shared.inner.borrow_mut();

        let old = match &inner.element {
            Some(element) if dom.parent(element).is_some() => element.clone(),
            _ => return Err(ViewError::DetachedView),
        };

        let mut next = inner.state.clone();
        next.merge(patch);
        let markup = inner.view.markup(&next);
        let fresh = dom.parse_fragment(&markup)?;
        dom.replace_with(&old, &fresh)?;

        inner.state = next;
        inner.element = Some(fresh.clone());
        self.bind(&mut inner, &fresh);
        debug!("view re-rendered, {} handlers bound", inner.listeners.len());
        Ok(())
    }
}

impl<V: HandlerBinder<D>, D: Dom> View<D> for StatefulView<V, D> {
    fn dom(&self) -> &D {
        &self.shared.dom
    }

    fn markup(&self) -> String {
        let inner = self.shared.inner.borrow();
        inner.view.markup(&inner.state)
    }

    fn element(&self) -> Result<D::Element, ViewError> {
        let mut inner = self.shared.inner.borrow_mut();
        if let Some(element) = &inner.element {
            return Ok(element.clone());
        }

        let markup = inner.view.markup(&inner.state);
        let element = self.shared.dom.parse_fragment(&markup)?;
        inner.element = Some(element.clone());
        self.bind(&mut inner, &element);
        debug!("view materialized, {} handlers bound", inner.listeners.len());
        Ok(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::dom::{DomEvent, EventKind, MemoryDom, MemoryListener, NodeId};
    use crate::framework::error::DomError;
    use crate::framework::render::{render, RenderPosition};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Count(u32);

    impl ViewState for Count {
        type Patch = u32;

        fn merge(&mut self, patch: u32) {
            self.0 = patch;
        }
    }

    /// Renders a counter; some values produce markup the document refuses.
    struct Counter;

    impl MarkupProducer for Counter {
        type State = Count;

        fn markup(&self, state: &Count) -> String {
            match state.0 {
                98 => "<p class=\"counter\">".to_string(),
                99 => "<p>a</p><p>b</p>".to_string(),
                value => format!(r#"<p class="counter">{value}</p>"#),
            }
        }
    }

    impl HandlerBinder<MemoryDom> for Counter {
        fn attach_handlers(scope: &ViewScope<Self, MemoryDom>, dom: &MemoryDom, root: &NodeId) -> Vec<MemoryListener> {
            let scope = scope.clone();
            vec![dom.listen(root, EventKind::Click, move |_: &DomEvent| {
                if let Some(view) = scope.upgrade() {
                    let next = view.state().0 + 1;
                    let _ = view.update_state(next);
                }
            })]
        }
    }

    fn mounted(dom: &MemoryDom) -> (NodeId, StatefulView<Counter, MemoryDom>) {
        let list = dom.parse_fragment(r#"<div class="list"><p>first</p></div>"#).unwrap();
        let view = StatefulView::new(dom.clone(), Counter, Count(1));
        render(&view, Some(&list), RenderPosition::BeforeEnd).unwrap();
        (list, view)
    }

    #[test]
    fn update_redraws_in_place_and_rebinds() {
        let dom = MemoryDom::new();
        let (list, view) = mounted(&dom);
        let old = view.element().unwrap();

        dom.dispatch(old, EventKind::Click);

        let fresh = view.element().unwrap();
        assert_eq!(view.state(), Count(2));
        assert_ne!(fresh, old);
        assert_eq!(dom.parent(&old), None);
        assert_eq!(
            dom.outer_html(list),
            r#"<div class="list"><p>first</p><p class="counter">2</p></div>"#
        );
        assert_eq!(dom.listener_count(), 1);

        dom.dispatch(fresh, EventKind::Click);
        assert_eq!(view.state(), Count(3));
    }

    #[test]
    fn failed_update_leaves_view_untouched() {
        let dom = MemoryDom::new();
        let (list, view) = mounted(&dom);
        let element = view.element().unwrap();
        let html = dom.outer_html(list);
        let listeners = dom.listener_count();

        assert_eq!(view.update_state(99), Err(ViewError::Dom(DomError::FragmentRoots(2))));
        assert!(matches!(view.update_state(98), Err(ViewError::Dom(DomError::Markup(_)))));

        assert_eq!(view.state(), Count(1));
        assert_eq!(view.element().unwrap(), element);
        assert_eq!(dom.parent(&element), Some(list));
        assert_eq!(dom.outer_html(list), html);
        assert_eq!(dom.listener_count(), listeners);

        // The surviving handlers still drive the view.
        dom.dispatch(element, EventKind::Click);
        assert_eq!(view.state(), Count(2));
    }

    #[test]
    fn update_needs_a_placed_element() {
        let dom = MemoryDom::new();
        let view = StatefulView::new(dom.clone(), Counter, Count(1));
        assert_eq!(view.update_state(5), Err(ViewError::DetachedView));

        view.element().unwrap();
        assert_eq!(view.update_state(5), Err(ViewError::DetachedView));
        assert_eq!(view.state(), Count(1));
    }

    #[test]
    fn dropping_the_view_unbinds_its_handlers() {
        let dom = MemoryDom::new();
        let (_list, view) = mounted(&dom);
        assert_eq!(dom.listener_count(), 1);

        drop(view);
        assert_eq!(dom.listener_count(), 0);
    }
}
