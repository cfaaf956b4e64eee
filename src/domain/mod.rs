// Domain layer: booking models and ports (collaborator traits).

pub mod model;
pub mod ports;
