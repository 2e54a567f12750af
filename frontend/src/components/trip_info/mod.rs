use crate::framework::view::Template;

/// Summary panel at the top of the page: route, dates and total cost.
pub struct TripInfo;

impl Template for TripInfo {
    fn markup(&self) -> String {
        r#"<section class="trip-main__trip-info  trip-info">
  <div class="trip-info__main">
    <h1 class="trip-info__title">Amsterdam &mdash; Chamonix &mdash; Geneva</h1>
    <p class="trip-info__dates">18&nbsp;&mdash;&nbsp;20 Mar</p>
  </div>
  <p class="trip-info__cost">
    Total: &euro;&nbsp;<span class="trip-info__cost-value">1230</span>
  </p>
</section>"#
            .to_string()
    }
}
