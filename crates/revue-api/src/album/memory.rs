//! Fixed-map album gateway for tests

use async_trait::async_trait;
use revue_core::{AlbumInfo, AlbumInfoGateway, Result, RevueError};
use std::collections::HashMap;

/// Gateway serving a fixed set of albums; unknown ids fail the lookup
#[derive(Default)]
pub struct StaticAlbumGateway {
    albums: HashMap<String, AlbumInfo>,
}

impl StaticAlbumGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_album(mut self, info: AlbumInfo) -> Self {
        self.albums.insert(info.id.clone(), info);
        self
    }
}

#[async_trait]
impl AlbumInfoGateway for StaticAlbumGateway {
    async fn album_info(&self, album_id: &str) -> Result<AlbumInfo> {
        self.albums
            .get(album_id)
            .cloned()
            .ok_or_else(|| RevueError::AlbumGateway(format!("unknown album {album_id}")))
    }
}
