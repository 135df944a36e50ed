pub mod banner;
pub mod chart;
pub mod slide;
pub mod status_bar;
pub mod thumbnails;
