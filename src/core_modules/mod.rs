pub mod actuator;
pub mod bounding_box;
pub mod frame;
pub mod occupancy;
pub mod overlay;
pub mod pixel;
pub mod region_grower;
pub mod scanner;
pub mod tracker;
pub mod utils;
