// Domain layer: device/firmware models and the resolver port.

pub mod model;
pub mod ports;
