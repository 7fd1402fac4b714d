pub mod audio;
pub mod favorites;
pub mod filter;
pub mod record_store;
pub mod session;

pub use audio::AudioPlayer;
pub use favorites::FavoriteSet;
pub use filter::{filter, EmptyReason, FilterOutcome};
pub use record_store::{LoadState, RecordStore};
pub use session::Session;
