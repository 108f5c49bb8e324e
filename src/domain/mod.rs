// Domain layer: drilling models and ports. No I/O here.

pub mod model;
pub mod ports;
