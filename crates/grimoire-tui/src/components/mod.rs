pub mod help_overlay;
pub mod menu;
pub mod race_overview;
pub mod race_select;
pub mod rules;
