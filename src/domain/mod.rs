// Domain layer: participants, exclusions, assignments and the ports the core talks through.

pub mod model;
pub mod ports;
