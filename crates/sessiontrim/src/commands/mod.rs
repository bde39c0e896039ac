pub mod compact;
pub mod sessions;
pub mod version;
