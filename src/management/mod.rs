mod store;
mod token;

pub use store::COLLECTION_BUILT_PLAYLIST;
pub use store::COLLECTION_IMPORTED_SONGS;
pub use store::COLLECTION_RECOMMENDATIONS;
pub use store::LibraryStore;
pub use store::StoreError;
pub use token::TokenHolder;
pub use token::is_expired;
