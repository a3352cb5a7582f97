mod registry;

pub use registry::ScoreRegistry;
