pub mod point_form;
pub mod trip_info;
