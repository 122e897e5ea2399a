mod entity_store;
mod error;
mod models;
mod relations;
mod shared;
mod store;
mod validation;

pub use entity_store::EntityStore;
pub use error::IndexError;
pub use models::{Album, Artist, Playlist, Song, User};
pub use relations::RelationshipIndex;
pub use shared::SharedMusicIndex;
pub use store::MusicIndex;
pub use validation::IntegrityProblem;
