//! Page wiring: finds the containers and starts the presenters.

use std::rc::Rc;

use common::model::catalog::PointCatalog;
use log::{info, warn};
use thiserror::Error;

use crate::config::AppConfig;
use crate::framework::dom::Dom;
use crate::framework::error::ViewError;
use crate::presenters::point_form::PointFormPresenter;
use crate::presenters::trip_info::TripInfoPresenter;

pub const BUNDLED_CATALOG: &str = include_str!("../static/catalog.json");

#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    View(#[from] ViewError),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

/// The running page. Dropping it unbinds the form's handlers.
pub struct App<D: Dom> {
    point_form: PointFormPresenter<D>,
}

impl<D: Dom> App<D> {
    /// Renders the page into the containers found below `root`.
    pub fn mount(dom: D, root: &D::Element, config: &AppConfig, catalog: PointCatalog) -> Result<Self, ViewError> {
        // Both containers are resolved first so a missing one leaves the page untouched.
        let trip_main = container(&dom, root, &config.trip_main_selector)?;
        let events = container(&dom, root, &config.events_selector)?;

        TripInfoPresenter::new(dom.clone(), Some(trip_main)).init()?;

        let mut point_form = PointFormPresenter::new(
            dom,
            Some(events),
            Rc::new(catalog.offers),
            Rc::new(catalog.destinations),
        )
        .with_icon_dir(config.icon_dir.clone())
        .with_default_type(config.default_point_type.clone());
        point_form.init()?;

        info!("page mounted");
        Ok(Self { point_form })
    }

    pub fn point_form(&self) -> &PointFormPresenter<D> {
        &self.point_form
    }
}

fn container<D: Dom>(dom: &D, root: &D::Element, selector: &str) -> Result<D::Element, ViewError> {
    dom.query_selector(root, selector).ok_or_else(|| {
        warn!("no container matches `{selector}`");
        ViewError::InvalidContainer
    })
}

pub fn bundled_catalog() -> Result<PointCatalog, StartError> {
    Ok(PointCatalog::from_json(BUNDLED_CATALOG)?)
}

#[cfg(not(target_arch = "wasm32"))]
const PREVIEW_PAGE: &str = r#"<div class="page-body">
  <header class="page-header">
    <div class="trip-main">
      <div class="trip-main__trip-controls  trip-controls"></div>
    </div>
  </header>
  <main class="page-main">
    <section class="trip-events">
      <ul class="trip-events__list"></ul>
    </section>
  </main>
</div>"#;

/// Renders the page into an in-memory document and returns its markup.
#[cfg(not(target_arch = "wasm32"))]
pub fn preview(config: &AppConfig) -> Result<String, StartError> {
    use crate::framework::dom::MemoryDom;

    let dom = MemoryDom::new();
    let page = dom.parse_fragment(PREVIEW_PAGE).map_err(ViewError::from)?;
    let app = App::mount(dom.clone(), &page, config, bundled_catalog()?)?;
    let html = dom.outer_html(page);
    drop(app);
    Ok(html)
}
