//! Browser host built on `web-sys`.

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement, HtmlTemplateElement};

use super::{Dom, DomEvent, EventKind};
use crate::framework::error::DomError;
use crate::framework::render::RenderPosition;

fn js_error(value: JsValue) -> DomError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    DomError::Host(message)
}

#[derive(Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new() -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| DomError::Host("no document available".to_string()))?;
        Ok(Self { document })
    }

    pub fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }
}

/// Removes its event listener when dropped.
pub struct WebListener {
    target: Element,
    kind: EventKind,
    closure: Option<Closure<dyn Fn(Event)>>,
}

impl Drop for WebListener {
    fn drop(&mut self) {
        let Some(closure) = self.closure.take() else {
            return;
        };
        let removed = self
            .target
            .remove_event_listener_with_callback(self.kind.as_str(), closure.as_ref().unchecked_ref());
        if let Err(err) = removed {
            warn!("failed to remove {} listener: {}", self.kind.as_str(), js_error(err));
        }
        // A handler that redraws its view drops its own listener while it runs.
        spawn_local(async move { drop(closure) });
    }
}

impl Dom for WebDom {
    type Element = Element;
    type Listener = WebListener;

    fn parse_fragment(&self, markup: &str) -> Result<Element, DomError> {
        let template: HtmlTemplateElement = self
            .document
            .create_element("template")
            .map_err(js_error)?
            .dyn_into()
            .map_err(|_| DomError::Host("`template` is not an HtmlTemplateElement".to_string()))?;
        template.set_inner_html(markup.trim());

        let content = template.content();
        match content.child_element_count() {
            1 => content.first_element_child().ok_or(DomError::FragmentRoots(0)),
            roots => Err(DomError::FragmentRoots(roots as usize)),
        }
    }

    fn insert_adjacent(&self, target: &Element, position: RenderPosition, element: &Element) -> Result<(), DomError> {
        target
            .insert_adjacent_element(position.as_str(), element)
            .map_err(js_error)?;
        Ok(())
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn replace_with(&self, old: &Element, new: &Element) -> Result<(), DomError> {
        let parent = old.parent_node().ok_or(DomError::NotAttached)?;
        parent.replace_child(new, old).map_err(js_error)?;
        Ok(())
    }

    fn query_selector(&self, root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).unwrap_or_else(|err| {
            warn!("bad selector `{selector}`: {}", js_error(err));
            None
        })
    }

    fn query_selector_all(&self, root: &Element, selector: &str) -> Vec<Element> {
        let nodes = match root.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!("bad selector `{selector}`: {}", js_error(err));
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn listen<F>(&self, element: &Element, kind: EventKind, handler: F) -> WebListener
    where
        F: Fn(&DomEvent) + 'static,
    {
        let closure = Closure::<dyn Fn(Event)>::new(move |event: Event| {
            let input = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok());
            let dom_event = DomEvent::new(input.as_ref().map(HtmlInputElement::value));

            handler(&dom_event);

            if dom_event.default_prevented() {
                event.prevent_default();
            }
            if let Some(input) = input {
                let rejection = dom_event.rejection();
                input.set_custom_validity(rejection.as_deref().unwrap_or_default());
                if rejection.is_some() {
                    input.report_validity();
                }
            }
        });

        if let Err(err) = element.add_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref()) {
            warn!("failed to add {} listener: {}", kind.as_str(), js_error(err));
        }

        WebListener {
            target: element.clone(),
            kind,
            closure: Some(closure),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use common::model::catalog::{DestinationCatalog, OfferCatalog};
    use common::model::destination::Destination;
    use common::model::offer::Offer;
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::HtmlElement;

    use super::*;
    use crate::components::point_form::{PointForm, PointFormView};
    use crate::framework::render::render;
    use crate::framework::view::View;

    wasm_bindgen_test_configure!(run_in_browser);

    fn form() -> PointForm {
        let offers = OfferCatalog::from_iter([
            ("taxi", vec![]),
            (
                "flight",
                vec![Offer {
                    id: "meal".to_string(),
                    title: "Add meal".to_string(),
                    price: 15,
                }],
            ),
        ]);
        let destinations = DestinationCatalog::new(vec![Destination {
            id: "d1".to_string(),
            name: "Geneva".to_string(),
            description: "Lake".to_string(),
            pictures: vec![],
        }]);
        PointForm::new(Rc::new(offers), Rc::new(destinations))
    }

    /// Parses `markup` and appends it to the page body.
    fn attached(dom: &WebDom, markup: &str) -> Element {
        let element = dom.parse_fragment(markup).unwrap();
        dom.body().unwrap().append_child(&element).unwrap();
        element
    }

    fn fire(target: &Element, kind: EventKind) {
        let event = Event::new(kind.as_str()).unwrap();
        target.dispatch_event(&event).unwrap();
    }

    fn type_radio(dom: &WebDom, root: &Element, point_type: &str) -> HtmlInputElement {
        dom.query_selector(root, &format!(r#".event__type-input[value="{point_type}"]"#))
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    /// Gives closures released with `spawn_local` a chance to be freed.
    async fn next_tick() {
        JsFuture::from(js_sys::Promise::resolve(&JsValue::NULL)).await.unwrap();
    }

    #[wasm_bindgen_test]
    fn template_parsing_needs_one_root() {
        let dom = WebDom::new().unwrap();

        let root = dom.parse_fragment("\n  <p class=\"note\">a</p>\n").unwrap();
        assert_eq!(root.tag_name(), "P");
        assert_eq!(dom.parse_fragment("<p>a</p><p>b</p>"), Err(DomError::FragmentRoots(2)));
        assert_eq!(dom.parse_fragment("   "), Err(DomError::FragmentRoots(0)));
    }

    #[wasm_bindgen_test]
    fn replace_keeps_the_slot() {
        let dom = WebDom::new().unwrap();
        let list = dom
            .parse_fragment(r#"<ul><li id="a"></li><li id="b"></li><li id="c"></li></ul>"#)
            .unwrap();
        let b = dom.query_selector(&list, "#b").unwrap();
        let fresh = dom.parse_fragment(r#"<li id="z"></li>"#).unwrap();

        dom.replace_with(&b, &fresh).unwrap();

        let ids: Vec<String> = dom.query_selector_all(&list, "li").iter().map(Element::id).collect();
        assert_eq!(ids, ["a", "z", "c"]);
        assert_eq!(dom.parent(&b), None);
        assert_eq!(dom.replace_with(&b, &fresh), Err(DomError::NotAttached));
    }

    #[wasm_bindgen_test]
    fn listener_is_removed_on_drop() {
        let dom = WebDom::new().unwrap();
        let button = attached(&dom, r#"<button type="button">go</button>"#);
        let clicks = Rc::new(Cell::new(0));
        let listener = {
            let clicks = clicks.clone();
            dom.listen(&button, EventKind::Click, move |_: &DomEvent| clicks.set(clicks.get() + 1))
        };
        let clickable: &HtmlElement = button.dyn_ref().unwrap();

        clickable.click();
        assert_eq!(clicks.get(), 1);

        drop(listener);
        clickable.click();
        assert_eq!(clicks.get(), 1);
        button.remove();
    }

    #[wasm_bindgen_test]
    async fn type_change_redraws_in_the_same_slot() {
        let dom = WebDom::new().unwrap();
        let list = attached(
            &dom,
            r#"<ul class="trip-events__list"><li id="before"></li><li id="after"></li></ul>"#,
        );
        let after = dom.query_selector(&list, "#after").unwrap();
        let view = PointFormView::blank(dom.clone(), form());
        render(&view, Some(&after), RenderPosition::BeforeBegin).unwrap();
        let old = view.element().unwrap();

        // The radio's own listener is dropped by the redraw it triggers.
        fire(&type_radio(&dom, &old, "flight"), EventKind::Change);
        next_tick().await;

        let fresh = view.element().unwrap();
        assert_eq!(view.state().point_type, "flight");
        assert_ne!(fresh, old);
        assert_eq!(dom.parent(&old), None);
        assert_eq!(fresh.previous_element_sibling().map(|e| e.id()).as_deref(), Some("before"));
        assert_eq!(fresh.next_element_sibling().map(|e| e.id()).as_deref(), Some("after"));
        assert_eq!(dom.query_selector_all(&fresh, ".event__offer-checkbox").len(), 1);

        fire(&type_radio(&dom, &old, "taxi"), EventKind::Change);
        assert_eq!(view.state().point_type, "flight");

        fire(&type_radio(&dom, &fresh, "taxi"), EventKind::Change);
        assert_eq!(view.state().point_type, "taxi");
        list.remove();
    }

    #[wasm_bindgen_test]
    fn unknown_destination_sets_validation_message() {
        let dom = WebDom::new().unwrap();
        let list = attached(&dom, r#"<ul class="trip-events__list"></ul>"#);
        let view = PointFormView::blank(dom.clone(), form());
        render(&view, Some(&list), RenderPosition::AfterBegin).unwrap();
        let root = view.element().unwrap();
        let input: HtmlInputElement = dom
            .query_selector(&root, ".event__input--destination")
            .unwrap()
            .dyn_into()
            .unwrap();

        input.set_value("Nowhere");
        fire(&input, EventKind::Change);

        assert!(input.validation_message().unwrap().contains("Nowhere"));
        assert_eq!(view.element().unwrap(), root);
        assert_eq!(view.state().destination, None);

        input.set_value("Geneva");
        fire(&input, EventKind::Change);

        assert_eq!(view.state().destination.as_deref(), Some("d1"));
        assert_eq!(input.validation_message().unwrap(), "");
        list.remove();
    }
}
