pub mod availability_grid;
pub mod header;
pub mod week_navigation;
