// Domain layer - Core conversion logic

pub mod errors;
pub mod model;
pub mod rules;
