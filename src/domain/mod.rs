// Domain layer: records, messages and the ports the migration talks through.

pub mod model;
pub mod ports;
