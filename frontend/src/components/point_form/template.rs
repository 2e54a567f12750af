//! Markup of the point form.
//!
//! The result is a single `<li>` wrapping one `<form>`. Void elements are
//! written self-closing so the fragment reads the same as HTML and as XML.
//! Sections that depend on optional data are left out entirely when the
//! data is missing: no offers section for a type without offers, no
//! destination section without a resolved destination.

use common::model::catalog::{DestinationCatalog, OfferCatalog};
use common::model::destination::{Destination, Picture};
use common::model::offer::Offer;

use super::state::PointState;
use crate::components::helpers::{capitalize, escape_html, format_form_time};

fn type_item(point_type: &str, index: usize, current: &str) -> String {
    let point_type_attr = escape_html(point_type);
    let checked = if point_type == current { r#" checked="""# } else { "" };
    format!(
        r#"<div class="event__type-item">
          <input id="event-type-{point_type_attr}-{index}" class="event__type-input  visually-hidden" type="radio" name="event-type" value="{point_type_attr}"{checked} />
          <label class="event__type-label  event__type-label--{point_type_attr}" for="event-type-{point_type_attr}-{index}">{label}</label>
        </div>"#,
        label = escape_html(&capitalize(point_type)),
    )
}

fn type_list(offers: &OfferCatalog, current: &str) -> String {
    let items: String = offers
        .types()
        .enumerate()
        .map(|(index, point_type)| type_item(point_type, index, current))
        .collect();
    format!(
        r#"<div class="event__type-list">
        <fieldset class="event__type-group">
          <legend class="visually-hidden">Event type</legend>
          {items}
        </fieldset>
      </div>"#
    )
}

fn destination_list(destinations: &DestinationCatalog) -> String {
    let options: String = destinations
        .iter()
        .map(|destination| format!(r#"<option value="{}"></option>"#, escape_html(&destination.name)))
        .collect();
    format!(r#"<datalist id="destination-list">{options}</datalist>"#)
}

fn offer_item(offer: &Offer, selected: bool) -> String {
    let id = escape_html(&offer.id);
    let checked = if selected { r#" checked="""# } else { "" };
    format!(
        r#"<div class="event__offer-selector">
          <input class="event__offer-checkbox  visually-hidden" id="{id}" type="checkbox" name="{id}"{checked} />
          <label class="event__offer-label" for="{id}">
            <span class="event__offer-title">{title}</span>
            &plus;&euro;&nbsp;
            <span class="event__offer-price">{price}</span>
          </label>
        </div>"#,
        title = escape_html(&offer.title),
        price = offer.price,
    )
}

fn offers_section(available: &[Offer], selected: &[String]) -> String {
    if available.is_empty() {
        return String::new();
    }
    let items: String = available
        .iter()
        .map(|offer| offer_item(offer, selected.contains(&offer.id)))
        .collect();
    format!(
        r#"<section class="event__section  event__section--offers">
          <h3 class="event__section-title  event__section-title--offers">Offers</h3>
          <div class="event__available-offers">{items}</div>
        </section>"#
    )
}

fn photo(picture: &Picture) -> String {
    format!(
        r#"<img class="event__photo" src="{}" alt="{}" />"#,
        escape_html(&picture.src),
        escape_html(&picture.description)
    )
}

fn destination_section(destination: Option<&Destination>) -> String {
    let Some(destination) = destination else {
        return String::new();
    };
    let photos: String = destination.pictures.iter().map(photo).collect();
    format!(
        r#"<section class="event__section  event__section--destination">
          <h3 class="event__section-title  event__section-title--destination">Destination</h3>
          <p class="event__destination-description">{description}</p>
          <div class="event__photos-container">
            <div class="event__photos-tape">{photos}</div>
          </div>
        </section>"#,
        description = escape_html(&destination.description),
    )
}

/// Markup of the whole form for `state`.
///
/// # Arguments
/// * `state` - The point being edited.
/// * `offers` - Source of the type list and of the offers of `state.point_type`.
/// * `destinations` - Names for the destination datalist.
/// * `icon_dir` - Directory of the type icons.
///
/// # Returns
/// A fragment with exactly one root, the `<li class="trip-events__item">`.
pub fn point_form(
    state: &PointState,
    offers: &OfferCatalog,
    destinations: &DestinationCatalog,
    icon_dir: &str,
) -> String {
    let point_type = escape_html(&state.point_type);
    let destination_name = state
        .active_destination
        .as_ref()
        .map(|destination| escape_html(&destination.name))
        .unwrap_or_default();

    format!(
        r##"<li class="trip-events__item">
  <form class="event event--edit" action="#" method="post">
    <header class="event__header">
      <div class="event__type-wrapper">
        <label class="event__type  event__type-btn" for="event-type-toggle">
          <span class="visually-hidden">Choose event type</span>
          <img class="event__type-icon" width="17" height="17" src="{icon_dir}/{point_type}.png" alt="Event type icon" />
        </label>
        <input class="event__type-toggle  visually-hidden" id="event-type-toggle" type="checkbox" />
        {type_list}
      </div>

      <div class="event__field-group  event__field-group--destination">
        <label class="event__label  event__type-output" for="event-destination">{point_type}</label>
        <input class="event__input  event__input--destination" id="event-destination" type="text" name="event-destination" value="{destination_name}" list="destination-list" />
        {destination_list}
      </div>

      <div class="event__field-group  event__field-group--time">
        <label class="visually-hidden" for="event-start-time">From</label>
        <input class="event__input  event__input--time" id="event-start-time" type="text" name="event-start-time" value="{time_start}" />
        &mdash;
        <label class="visually-hidden" for="event-end-time">To</label>
        <input class="event__input  event__input--time" id="event-end-time" type="text" name="event-end-time" value="{time_end}" />
      </div>

      <div class="event__field-group  event__field-group--price">
        <label class="event__label" for="event-price">
          <span class="visually-hidden">Price</span>
          &euro;
        </label>
        <input class="event__input  event__input--price" id="event-price" type="text" name="event-price" value="{price}" />
      </div>

      <button class="event__save-btn  btn  btn--blue" type="submit">Save</button>
      <button class="event__reset-btn" type="reset">Cancel</button>
    </header>
    <section class="event__details">
      {offers_section}
      {destination_section}
    </section>
  </form>
</li>"##,
        icon_dir = escape_html(icon_dir),
        type_list = type_list(offers, &state.point_type),
        destination_list = destination_list(destinations),
        time_start = format_form_time(state.date_from.as_ref()),
        time_end = format_form_time(state.date_to.as_ref()),
        price = state.base_price.unwrap_or(0),
        offers_section = offers_section(offers.offers_for(&state.point_type), &state.offers),
        destination_section = destination_section(state.active_destination.as_ref()),
    )
}
