mod aggregate;
mod image_store;
mod reaction;
mod repository;

pub use aggregate::Post;
pub use image_store::ImageStore;
pub use reaction::{Reaction, ReactionAction};
pub use repository::{PostRepository, ReactionRepository};
