pub mod model;
pub mod series;
pub mod snapshot;
