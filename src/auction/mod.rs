pub mod bid;
pub mod detail;
pub mod model;
