//! Album metadata gateway implementations

pub mod http;
pub mod memory;

pub use http::HttpAlbumGateway;
pub use memory::StaticAlbumGateway;
