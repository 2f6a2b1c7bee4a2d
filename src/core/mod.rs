pub mod accounting;
pub mod export;
pub mod sessions;
pub mod stats;
pub mod timer;
