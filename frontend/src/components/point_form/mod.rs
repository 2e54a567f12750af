//! Point form: the editor for a single stop of the trip.
//!
//! `PointForm` holds the read-only catalogs and rendering settings, and is
//! driven by [`StatefulView`] through the trait set in
//! [`framework::stateful`](crate::framework::stateful). [`PointFormView`] adds
//! the interactions the handlers trigger:
//!
//! - switching the point type redraws the form and clears the selected
//!   offers, since offers only make sense for the type they belong to;
//! - typing a destination name resolves it against the catalog by exact
//!   name; an unknown name is an error and the state is left untouched.
//!
//! Loading a stored point is more lenient than editing one: a destination id
//! missing from the catalog simply leaves the resolved destination empty.

use std::rc::Rc;

use common::model::catalog::{DestinationCatalog, OfferCatalog};
use common::model::point::Point;

mod handlers;
pub mod state;
mod template;

use crate::framework::dom::Dom;
use crate::framework::error::ViewError;
use crate::framework::stateful::{MarkupProducer, StateTranslator, StatefulView};
pub use state::{PointPatch, PointState};

pub const DEFAULT_ICON_DIR: &str = "img/icons";
pub const DEFAULT_POINT_TYPE: &str = "taxi";

/// Receives the edited point when the form is submitted.
pub type SubmitCallback = Rc<dyn Fn(Point)>;

/// Catalogs and settings behind a point form. The editable data lives in
/// [`PointState`], owned by the [`StatefulView`] wrapping this.
pub struct PointForm {
    /// Point types in display order and the offers of each.
    offers: Rc<OfferCatalog>,
    /// Destinations offered in the datalist and used to resolve names.
    destinations: Rc<DestinationCatalog>,
    /// Where `<type>.png` icons are served from.
    icon_dir: String,
    /// Type of a point created with [`PointFormView::blank`].
    default_type: String,
    /// Called with the edited point on submit; nothing happens when unset.
    on_submit: Option<SubmitCallback>,
}

impl PointForm {
    pub fn new(offers: Rc<OfferCatalog>, destinations: Rc<DestinationCatalog>) -> Self {
        Self {
            offers,
            destinations,
            icon_dir: DEFAULT_ICON_DIR.to_string(),
            default_type: DEFAULT_POINT_TYPE.to_string(),
            on_submit: None,
        }
    }

    /// Directory the type icons are served from, without trailing slash.
    pub fn with_icon_dir(mut self, icon_dir: impl Into<String>) -> Self {
        self.icon_dir = icon_dir.into();
        self
    }

    /// Type of a freshly created point.
    pub fn with_default_type(mut self, point_type: impl Into<String>) -> Self {
        self.default_type = point_type.into();
        self
    }
}

impl MarkupProducer for PointForm {
    type State = PointState;

    fn markup(&self, state: &PointState) -> String {
        template::point_form(state, &self.offers, &self.destinations, &self.icon_dir)
    }
}

impl StateTranslator for PointForm {
    type Record = Point;

    fn to_state(&self, point: Point) -> PointState {
        let active_destination = point
            .destination
            .as_deref()
            .and_then(|id| self.destinations.by_id(id))
            .cloned();

        PointState {
            point_type: point.point_type,
            date_from: point.date_from,
            date_to: point.date_to,
            destination: point.destination,
            active_destination,
            base_price: point.base_price,
            offers: point.offers,
        }
    }

    fn to_record(&self, state: &PointState) -> Point {
        Point {
            point_type: state.point_type.clone(),
            date_from: state.date_from,
            date_to: state.date_to,
            destination: state.destination.clone(),
            base_price: state.base_price,
            offers: state.offers.clone(),
        }
    }
}

pub type PointFormView<D> = StatefulView<PointForm, D>;

impl<D: Dom> StatefulView<PointForm, D> {
    /// A form for a new point of the form's default type.
    pub fn blank(dom: D, form: PointForm) -> Self {
        let point = Point::blank(form.default_type.clone());
        Self::with_point(dom, form, point)
    }

    /// A form editing `point`.
    pub fn with_point(dom: D, form: PointForm, point: Point) -> Self {
        let state = form.to_state(point);
        StatefulView::new(dom, form, state)
    }

    /// The point as it would be stored, without render-only fields.
    pub fn record(&self) -> Point {
        let state = self.state();
        self.with_view(|form| form.to_record(&state))
    }

    pub fn on_submit(&self, callback: impl Fn(Point) + 'static) {
        self.with_view_mut(|form| form.on_submit = Some(Rc::new(callback)));
    }

    /// Switches the point type and clears the selected offers. Selecting the
    /// current type again does nothing.
    pub fn change_type(&self, point_type: &str) -> Result<(), ViewError> {
        if self.state().point_type == point_type {
            return Ok(());
        }
        self.update_state(PointPatch::switch_type(point_type))
    }

    /// Points the form at the destination called exactly `name`.
    pub fn change_destination(&self, name: &str) -> Result<(), ViewError> {
        let destination = self
            .with_view(|form| form.destinations.by_name(name).cloned())
            .ok_or_else(|| ViewError::UnknownReference(name.to_string()))?;
        self.update_state(PointPatch::destination(&destination))
    }
}
