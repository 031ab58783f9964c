mod route_shape_error;
pub mod shape_app;
pub mod shape_ops;

pub use route_shape_error::RouteShapeError;
