//! Interaction handlers of the point form.
//!
//! Every handler is bound to one root element only. After a redraw the view
//! drops the old guards and calls [`attach_handlers`] again on the new root.
//!
//! [`attach_handlers`]: HandlerBinder::attach_handlers

use log::warn;

use super::PointForm;
use crate::framework::dom::{Dom, DomEvent, EventKind};
use crate::framework::stateful::{HandlerBinder, ViewScope};

impl<D: Dom> HandlerBinder<D> for PointForm {
    fn attach_handlers(scope: &ViewScope<Self, D>, dom: &D, root: &D::Element) -> Vec<D::Listener> {
        let mut listeners = Vec::new();

        match dom.query_selector(root, ".event") {
            Some(form) => listeners.push(dom.listen(&form, EventKind::Submit, submit_handler(scope.clone()))),
            None => warn!("point form markup has no `.event` form"),
        }

        match dom.query_selector(root, ".event__reset-btn") {
            Some(button) => listeners.push(dom.listen(&button, EventKind::Click, |event: &DomEvent| {
                event.prevent_default();
            })),
            None => warn!("point form markup has no cancel button"),
        }

        match dom.query_selector(root, ".event__input--destination") {
            Some(input) => listeners.push(dom.listen(&input, EventKind::Change, destination_handler(scope.clone()))),
            None => warn!("point form markup has no destination input"),
        }

        for input in dom.query_selector_all(root, ".event__type-input") {
            listeners.push(dom.listen(&input, EventKind::Change, type_handler(scope.clone())));
        }

        listeners
    }
}

fn submit_handler<D: Dom>(scope: ViewScope<PointForm, D>) -> impl Fn(&DomEvent) + 'static {
    move |event: &DomEvent| {
        event.prevent_default();
        let Some(view) = scope.upgrade() else {
            return;
        };
        let callback = view.with_view(|form| form.on_submit.clone());
        if let Some(callback) = callback {
            callback(view.record());
        }
    }
}

fn type_handler<D: Dom>(scope: ViewScope<PointForm, D>) -> impl Fn(&DomEvent) + 'static {
    move |event: &DomEvent| {
        event.prevent_default();
        let (Some(view), Some(point_type)) = (scope.upgrade(), event.value()) else {
            return;
        };
        if let Err(err) = view.change_type(point_type) {
            warn!("point type change to `{point_type}` failed: {err}");
            event.reject(err.to_string());
        }
    }
}

fn destination_handler<D: Dom>(scope: ViewScope<PointForm, D>) -> impl Fn(&DomEvent) + 'static {
    move |event: &DomEvent| {
        event.prevent_default();
        let Some(view) = scope.upgrade() else {
            return;
        };
        let name = event.value().unwrap_or_default();
        if let Err(err) = view.change_destination(name) {
            warn!("destination change rejected: {err}");
            event.reject(err.to_string());
        }
    }
}
