mod proximity;
mod route;
mod topology;

pub use proximity::SpatialIndex;
pub use route::Router;
pub use topology::Topology;
