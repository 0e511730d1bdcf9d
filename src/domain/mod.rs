// Domain layer: the service information model and the ports around it.

pub mod model;
pub mod ports;
pub mod wire;
