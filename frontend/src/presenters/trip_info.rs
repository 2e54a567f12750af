use crate::components::trip_info::TripInfo;
use crate::framework::dom::Dom;
use crate::framework::error::ViewError;
use crate::framework::render::{render, RenderPosition};
use crate::framework::view::StaticView;

/// Puts the trip summary at the top of its container.
pub struct TripInfoPresenter<D: Dom> {
    dom: D,
    container: Option<D::Element>,
}

impl<D: Dom> TripInfoPresenter<D> {
    pub fn new(dom: D, container: Option<D::Element>) -> Self {
        Self { dom, container }
    }

    pub fn init(&self) -> Result<(), ViewError> {
        let view = StaticView::new(self.dom.clone(), TripInfo);
        render(&view, self.container.as_ref(), RenderPosition::AfterBegin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::dom::MemoryDom;

    #[test]
    fn renders_summary_first_in_container() {
        let dom = MemoryDom::new();
        let container = dom
            .parse_fragment(r#"<div class="trip-main"><div class="trip-main__trip-controls"></div></div>"#)
            .unwrap();

        TripInfoPresenter::new(dom.clone(), Some(container)).init().unwrap();

        let first = dom.children(container)[0];
        assert_eq!(dom.attribute(first, "class").as_deref(), Some("trip-main__trip-info  trip-info"));
        let cost = dom.query_selector(&container, ".trip-info__cost-value").unwrap();
        assert_eq!(dom.text_content(cost), "1230");
    }

    #[test]
    fn missing_container_fails() {
        let presenter = TripInfoPresenter::new(MemoryDom::new(), None);
        assert_eq!(presenter.init(), Err(ViewError::InvalidContainer));
    }
}
