//! Projection of world state into rendering scenes.

use anyhow::{Context, Result};
use neck_maze_rendering::{cell_center, CirclePresentation, Color, MazePresentation, Scene};
use neck_maze_world::{query, World};

/// Builds the initial scene for a freshly started session.
pub(crate) fn build_scene(world: &World) -> Result<Scene> {
    let maze = query::maze(world);
    let walls = MazePresentation::new(
        maze.width(),
        maze.height(),
        maze.cells().to_vec(),
        Color::WHITE,
    )
    .context("occupancy grid does not match its dimensions")?;

    let player = query::player(world);
    let goal = query::goal(world);
    let mut scene = Scene::new(
        walls,
        CirclePresentation::new(
            cell_center(player.position()),
            player.radius() as f32,
            Color::GREEN,
        ),
        CirclePresentation::new(
            cell_center(goal.position()),
            goal.radius() as f32,
            Color::RED,
        ),
    );
    sync_scene(world, &mut scene);
    Ok(scene)
}

/// Refreshes the parts of the scene that change between ticks.
pub(crate) fn sync_scene(world: &World, scene: &mut Scene) {
    scene.player.center = cell_center(query::player(world).position());
    scene.goal.center = cell_center(query::goal(world).position());
    scene.mark_signal(query::last_signal(world));
    scene.finished_after = query::elapsed(world);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use neck_maze_core::{Command, Position, Signal};
    use neck_maze_world::{self as world, Goal, Maze, Player};

    #[test]
    fn scene_follows_the_world() {
        let mut world = World::from_parts(
            Maze::new(40, 40, &[], 1),
            Player::at(Position::new(1, 1), 2),
            Goal::at(Position::new(30, 30), 3),
        )
        .expect("free cells");
        let mut scene = build_scene(&world).expect("scene builds");
        assert_eq!(scene.player.radius, 2.0);
        assert_eq!(scene.goal.radius, 3.0);
        assert!(scene.signal_marker.is_none());

        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(2),
                signal: Some(Signal::new(29, 30)),
            },
            &mut events,
        );
        sync_scene(&world, &mut scene);

        assert_eq!(scene.player.center, cell_center(Position::new(29, 30)));
        assert!(scene.signal_marker.is_some());
        assert_eq!(scene.banner().as_deref(), Some("You Win! Time: 2.00s"));
    }
}
