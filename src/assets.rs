//! Sprite loading gate
//!
//! All sprites are fetched concurrently and joined once. The first failure
//! wins: it is returned and the remaining loads are dropped, so the game loop
//! can never start with a missing image.

use std::fmt;
use std::future::Future;

use futures_util::future::{try_join_all, try_join3};
use thiserror::Error;

/// Which slot a sprite fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Character,
    Background,
    Obstacle(usize),
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Character => write!(f, "character"),
            AssetKind::Background => write!(f, "background"),
            AssetKind::Obstacle(i) => write!(f, "obstacle #{}", i + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("Failed to load {kind} image: {path}")]
    Load { kind: AssetKind, path: String },

    #[error("No obstacle images configured")]
    NoObstacleSprites,
}

/// Declared asset paths
#[derive(Debug, Clone)]
pub struct AssetManifest {
    pub character: String,
    pub background: String,
    pub obstacles: Vec<String>,
    pub jump_sound: String,
    pub crash_sound: String,
    pub music: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            character: "character.png".into(),
            background: "images/background.jpg".into(),
            obstacles: vec![
                "images/obstacle1.png".into(),
                "images/obstacle2.png".into(),
                "images/obstacle3.png".into(),
            ],
            jump_sound: "sounds/jump.wav".into(),
            crash_sound: "sounds/crash.wav".into(),
            music: "sounds/music.wav".into(),
        }
    }
}

/// Fetches one image by path. Loads must be independent of each other.
pub trait SpriteLoader {
    type Sprite;

    /// Failures should be reported as [`AssetError::Load`] naming `kind`
    fn load(
        &self,
        kind: AssetKind,
        path: &str,
    ) -> impl Future<Output = Result<Self::Sprite, AssetError>>;
}

/// Every sprite the render pass needs
#[derive(Debug, Clone)]
pub struct SpriteSet<S> {
    pub character: S,
    pub background: S,
    /// Declared order, regardless of which finished first
    pub obstacles: Vec<S>,
}

/// Load every sprite in the manifest concurrently.
pub async fn load_sprites<L: SpriteLoader>(
    loader: &L,
    manifest: &AssetManifest,
) -> Result<SpriteSet<L::Sprite>, AssetError> {
    if manifest.obstacles.is_empty() {
        return Err(AssetError::NoObstacleSprites);
    }

    let obstacles = try_join_all(
        manifest
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, path)| loader.load(AssetKind::Obstacle(i), path)),
    );
    let (character, background, obstacles) = try_join3(
        loader.load(AssetKind::Character, &manifest.character),
        loader.load(AssetKind::Background, &manifest.background),
        obstacles,
    )
    .await?;

    log::info!("Loaded {} sprites", obstacles.len() + 2);
    Ok(SpriteSet {
        character,
        background,
        obstacles,
    })
}

/// Gate `start` behind the sprite join. `start` runs only if every load succeeded.
pub async fn launch<L, F, R>(loader: &L, manifest: &AssetManifest, start: F) -> Result<R, AssetError>
where
    L: SpriteLoader,
    F: FnOnce(SpriteSet<L::Sprite>) -> R,
{
    match load_sprites(loader, manifest).await {
        Ok(sprites) => Ok(start(sprites)),
        Err(err) => {
            log::error!("Failed to load images: {}", err);
            Err(err)
        }
    }
}
