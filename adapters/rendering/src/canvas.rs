//! Raster backend drawing scenes into an RGB image.

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use image::{Rgb, RgbImage};

use crate::{CirclePresentation, Color, Scene};

/// Pixel buffer holding one rendered frame.
///
/// One pixel corresponds to one maze cell.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Rasterizes `scene` onto a background of `clear_color`.
    ///
    /// Draw order is walls, player, goal, then the signal marker, so the goal
    /// covers the player where the two overlap.
    #[must_use]
    pub fn render(scene: &Scene, clear_color: Color) -> Self {
        let maze = &scene.maze;
        let background = Rgb(clear_color.to_rgb_u8());
        let mut image = RgbImage::from_pixel(maze.width, maze.height, background);

        let wall = Rgb(maze.wall_color.to_rgb_u8());
        for y in 0..maze.height {
            for x in 0..maze.width {
                if maze.is_wall(x, y) {
                    image.put_pixel(x, y, wall);
                }
            }
        }

        fill_circle(&mut image, &scene.player);
        fill_circle(&mut image, &scene.goal);
        if let Some(marker) = &scene.signal_marker {
            fill_circle(&mut image, marker);
        }

        Self { image }
    }

    /// Width of the canvas in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height of the canvas in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Byte RGB value at `(x, y)`, or `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    /// Writes the canvas to disk as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("failed to write frame to {}", path.display()))
    }
}

fn fill_circle(image: &mut RgbImage, circle: &CirclePresentation) {
    if circle.radius < 0.0 || image.width() == 0 || image.height() == 0 {
        return;
    }

    let color = Rgb(circle.color.to_rgb_u8());
    let min_x = (circle.center.x - circle.radius).floor().max(0.0) as u32;
    let min_y = (circle.center.y - circle.radius).floor().max(0.0) as u32;
    let max_x = (circle.center.x + circle.radius).ceil();
    let max_y = (circle.center.y + circle.radius).ceil();
    if max_x < 0.0 || max_y < 0.0 {
        return;
    }
    let max_x = (max_x as u32).min(image.width().saturating_sub(1));
    let max_y = (max_y as u32).min(image.height().saturating_sub(1));

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if circle.contains(Vec2::new(x as f32, y as f32)) {
                image.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::small_scene;

    #[test]
    fn canvas_matches_maze_dimensions() {
        let canvas = Canvas::render(&small_scene(), Color::BLACK);
        assert_eq!((canvas.width(), canvas.height()), (8, 4));
        assert_eq!(canvas.pixel(8, 0), None);
    }

    #[test]
    fn canvas_draws_walls_goal_and_player() {
        let canvas = Canvas::render(&small_scene(), Color::BLACK);

        assert_eq!(canvas.pixel(3, 2), Some([255, 255, 255]));
        assert_eq!(canvas.pixel(6, 2), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(7, 2), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 255, 0]));
        assert_eq!(canvas.pixel(0, 3), Some([0, 0, 0]));
    }

    #[test]
    fn goal_is_drawn_over_an_overlapping_player() {
        let mut scene = small_scene();
        scene.player = CirclePresentation::new(Vec2::new(5.0, 2.0), 1.0, Color::GREEN);
        let canvas = Canvas::render(&scene, Color::BLACK);

        assert_eq!(canvas.pixel(5, 2), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(4, 2), Some([0, 255, 0]));
    }

    #[test]
    fn circles_past_the_edge_are_clipped() {
        let mut scene = small_scene();
        scene.player = CirclePresentation::new(Vec2::new(-1.0, -1.0), 2.0, Color::GREEN);
        let canvas = Canvas::render(&scene, Color::BLACK);

        assert_eq!(canvas.pixel(0, 0), Some([0, 255, 0]));
        assert_eq!(canvas.pixel(2, 2), Some([0, 0, 0]));
    }
}
