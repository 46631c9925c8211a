//! Per-tick movement along a committed path
//!
//! Converts elapsed time into board distance and walks it along the
//! entity's waypoints. Several waypoints can be crossed in one tick; each
//! crossing settles AP and visibility before the next waypoint is looked at.

use crate::core::config::TacticsConfig;
use crate::tactics::animation::{AnimCommand, AnimState, Facing};
use crate::tactics::entity::Entity;
use crate::tactics::grid::Grid;
use crate::tactics::vertex::Coordinate;

/// Discretize a heading (degrees) into one of the two sprite facings
pub fn facing_for_angle(config: &TacticsConfig, degrees: f32) -> Facing {
    if degrees >= config.facing_min_deg && degrees < config.facing_max_deg {
        Facing::Front
    } else {
        Facing::Back
    }
}

/// Request a turn if the heading towards `target` needs the other facing
pub fn turn_to_face(config: &TacticsConfig, entity: &mut Entity, target: Coordinate) {
    let heading = target.to_vec2() - entity.pos;
    let face = facing_for_angle(config, heading.angle_degrees());
    if face != entity.animator.facing() {
        entity.animator.command(AnimCommand::Turn);
    }
}

/// Advance `entity` by `dt` seconds of walking
///
/// Returns true once the entity has no waypoints left.
pub fn advance_entity(grid: &Grid, config: &TacticsConfig, entity: &mut Entity, dt: f32) -> bool {
    let dist = entity.unit_type.move_speed * dt;
    advance(grid, config, entity, dist)
}

/// Walk up to `dist` board units along the entity's path
///
/// Every pass of the loop either pops a waypoint or consumes positive
/// distance, and stops once the budget is spent or the animation is not in
/// its walking phase yet, so it finishes in at most `2 * waypoints + 1`
/// passes.
pub fn advance(grid: &Grid, config: &TacticsConfig, entity: &mut Entity, mut dist: f32) -> bool {
    loop {
        let Some(&waypoint) = entity.path.front() else {
            if entity.animator.state() != AnimState::Ready {
                entity.animator.command(AnimCommand::Stop);
            }
            return true;
        };

        if entity.animator.state() != AnimState::Walk {
            entity.animator.command(AnimCommand::Move);
        }
        if entity.animator.current_anim() != AnimState::Walk {
            return false;
        }
        if dist <= 0.0 {
            return false;
        }

        let target = waypoint.to_vec2();
        let delta = target - entity.pos;
        let remaining = delta.length();

        if remaining <= config.waypoint_epsilon {
            entity.pos = target;
            entity.enter_cell(grid, waypoint);
            entity.path.pop_front();
            dist -= remaining;
            continue;
        }

        if dist >= remaining {
            entity.pos = target;
            dist -= remaining;
        } else {
            entity.pos = entity.pos + delta.normalize() * dist;
            dist = 0.0;
            turn_to_face(config, entity, waypoint);
        }
    }
}
