//! 2D render pass
//!
//! Draws the post-step state back to front: background tiles, obstacles,
//! character, score text. The drawing surface itself is behind [`Surface`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::assets::SpriteSet;
use crate::sim::GameState;

/// HUD text placement and style
pub mod hud {
    pub const SCORE_X: f32 = 20.0;
    pub const SCORE_Y: f32 = 40.0;
    pub const FONT: &str = "30px Arial";
    pub const COLOR: &str = "white";
}

/// A drawing target that can blit sprites and fill text
pub trait Surface {
    type Sprite;

    fn draw_image(&mut self, sprite: &Self::Sprite, x: f32, y: f32, w: f32, h: f32);

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);
}

pub fn score_text(obstacles_passed: u32) -> String {
    format!("Obstacles Passed: {}", obstacles_passed)
}

/// Draw one frame of `state`
pub fn draw_frame<S: Surface>(state: &GameState, sprites: &SpriteSet<S::Sprite>, surface: &mut S) {
    let bg = &state.background;
    for x in bg.tiles() {
        surface.draw_image(&sprites.background, x, 0.0, bg.size.x, bg.size.y);
    }

    for obstacle in &state.obstacles {
        // Sprite indices come from the same set, but don't trust a resized set
        let Some(sprite) = sprites.obstacles.get(obstacle.sprite) else {
            log::warn!("Obstacle {} has no sprite {}", obstacle.id, obstacle.sprite);
            continue;
        };
        surface.draw_image(
            sprite,
            obstacle.pos.x,
            obstacle.pos.y,
            obstacle.size.x,
            obstacle.size.y,
        );
    }

    let c = &state.character;
    surface.draw_image(&sprites.character, c.pos.x, c.pos.y, c.size.x, c.size.y);

    surface.draw_text(
        &score_text(state.run.obstacles_passed),
        hud::SCORE_X,
        hud::SCORE_Y,
        hud::FONT,
        hud::COLOR,
    );
}
