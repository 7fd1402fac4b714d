pub mod local_store;
pub mod offline_cache;
pub mod speech;

pub use local_store::LocalStore;
pub use offline_cache::{CacheIndex, FetchSource, InstallReport, OfflineCache};
pub use speech::{CommandSpeech, SpeechBackend};
