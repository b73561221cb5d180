pub mod chrome;
pub mod expression_input;
pub mod field_panel;
pub mod field_tabs;
pub mod status_bar;
