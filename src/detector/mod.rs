pub mod resolver;
pub mod scorer;

pub use resolver::{Resolution, UpdateDetector};
pub use scorer::meta_similarity;
