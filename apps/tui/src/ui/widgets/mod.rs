pub mod charts;
pub mod dropdown;
pub mod popup;
pub mod tables;
