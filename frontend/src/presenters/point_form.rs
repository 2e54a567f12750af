use std::rc::Rc;

use common::model::catalog::{DestinationCatalog, OfferCatalog};
use log::info;

use crate::components::point_form::{PointForm, PointFormView};
use crate::framework::dom::Dom;
use crate::framework::error::ViewError;
use crate::framework::render::{render, RenderPosition};

/// Opens a blank point form at the top of the event list.
///
/// The presenter keeps the view it created: dropping the view would unbind
/// its handlers.
pub struct PointFormPresenter<D: Dom> {
    dom: D,
    container: Option<D::Element>,
    offers: Rc<OfferCatalog>,
    destinations: Rc<DestinationCatalog>,
    icon_dir: String,
    default_type: String,
    view: Option<PointFormView<D>>,
}

impl<D: Dom> PointFormPresenter<D> {
    pub fn new(
        dom: D,
        container: Option<D::Element>,
        offers: Rc<OfferCatalog>,
        destinations: Rc<DestinationCatalog>,
    ) -> Self {
        Self {
            dom,
            container,
            offers,
            destinations,
            icon_dir: crate::components::point_form::DEFAULT_ICON_DIR.to_string(),
            default_type: crate::components::point_form::DEFAULT_POINT_TYPE.to_string(),
            view: None,
        }
    }

    pub fn with_icon_dir(mut self, icon_dir: impl Into<String>) -> Self {
        self.icon_dir = icon_dir.into();
        self
    }

    pub fn with_default_type(mut self, point_type: impl Into<String>) -> Self {
        self.default_type = point_type.into();
        self
    }

    pub fn init(&mut self) -> Result<(), ViewError> {
        let form = PointForm::new(self.offers.clone(), self.destinations.clone())
            .with_icon_dir(self.icon_dir.clone())
            .with_default_type(self.default_type.clone());
        let view = PointFormView::blank(self.dom.clone(), form);
        view.on_submit(|point| info!("point submitted: {point:?}"));

        render(&view, self.container.as_ref(), RenderPosition::AfterBegin)?;
        self.view = Some(view);
        Ok(())
    }

    pub fn view(&self) -> Option<&PointFormView<D>> {
        self.view.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::dom::MemoryDom;
    use common::model::offer::Offer;

    fn presenter(dom: &MemoryDom, container: Option<<MemoryDom as Dom>::Element>) -> PointFormPresenter<MemoryDom> {
        let offers = OfferCatalog::from_iter([(
            "flight",
            vec![Offer {
                id: "meal".to_string(),
                title: "Add meal".to_string(),
                price: 15,
            }],
        )]);
        PointFormPresenter::new(dom.clone(), container, Rc::new(offers), Rc::default())
            .with_default_type("flight")
    }

    #[test]
    fn keeps_the_form_alive_and_interactive() {
        let dom = MemoryDom::new();
        let list = dom.parse_fragment(r#"<ul class="trip-events__list"><li></li></ul>"#).unwrap();
        let mut presenter = presenter(&dom, Some(list));

        presenter.init().unwrap();

        let view = presenter.view().unwrap();
        assert!(view.is_rendered());
        assert_eq!(view.state().point_type, "flight");
        assert_eq!(dom.children(list).len(), 2);
        assert!(dom.listener_count() > 0);
        assert_eq!(view.change_destination("Paris"), Err(ViewError::UnknownReference("Paris".to_string())));
    }

    #[test]
    fn missing_container_leaves_nothing_behind() {
        let dom = MemoryDom::new();
        let mut presenter = presenter(&dom, None);

        assert_eq!(presenter.init(), Err(ViewError::InvalidContainer));
        assert!(presenter.view().is_none());
        assert_eq!(dom.listener_count(), 0);
    }
}
