mod shape_cli_error;
pub mod track;
pub mod transit;

pub use shape_cli_error::ShapeCliError;
