mod shape_config;

pub use shape_config::ShapeGenerationConfiguration;
