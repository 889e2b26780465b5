// Domain layer: problem/solution models and ports (interfaces).

pub mod model;
pub mod ports;
