pub mod document;
pub mod lab_chart;
pub mod loading;
pub mod sidebar;
