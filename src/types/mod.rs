pub mod date_range;
pub mod reading;
pub mod time_filter;
pub mod water_temp_frame;
