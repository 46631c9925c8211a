//! Animation layer interface consumed by the movement driver
//!
//! The driver only *requests* transitions. A request may take several
//! ticks to become visible, so the driver always re-reads the state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete animation states the movement core cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Ready,
    Walk,
}

/// Two-way sprite facing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Back,
    Front,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Facing::Back => Facing::Front,
            Facing::Front => Facing::Back,
        }
    }
}

/// Transition requests issued to the animation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimCommand {
    Move,
    Stop,
    Turn,
}

/// Narrow view of a sprite's animation state machine
pub trait Animator: fmt::Debug {
    /// State the state machine is in (or heading to)
    fn state(&self) -> AnimState;

    /// Animation currently playing; lags `state` while a transition runs
    fn current_anim(&self) -> AnimState;

    fn facing(&self) -> Facing;

    fn command(&mut self, command: AnimCommand);

    /// Advance playback by `dt` seconds
    fn think(&mut self, _dt: f32) {}
}

/// Controls animation state for a single entity.
///
/// State changes take effect in `state()` immediately and in
/// `current_anim()` once `transition_time` seconds have passed.
#[derive(Clone, Debug)]
pub struct AnimationController {
    state: AnimState,
    current_anim: AnimState,
    facing: Facing,
    /// Seconds a state change takes to show
    pub transition_time: f32,
    pending: f32,
    /// Every command received, oldest first
    pub history: Vec<AnimCommand>,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AnimationController {
    pub fn new(transition_time: f32) -> Self {
        Self {
            state: AnimState::Ready,
            current_anim: AnimState::Ready,
            facing: Facing::Back,
            transition_time,
            pending: 0.0,
            history: Vec::new(),
        }
    }

    /// Controller whose transitions show up without delay
    pub fn instant() -> Self {
        Self::new(0.0)
    }

    fn set_state(&mut self, state: AnimState) {
        if self.state == state {
            return;
        }
        self.state = state;
        if self.transition_time <= 0.0 {
            self.current_anim = state;
            self.pending = 0.0;
        } else {
            self.pending = self.transition_time;
        }
    }
}

impl Animator for AnimationController {
    fn state(&self) -> AnimState {
        self.state
    }

    fn current_anim(&self) -> AnimState {
        self.current_anim
    }

    fn facing(&self) -> Facing {
        self.facing
    }

    fn command(&mut self, command: AnimCommand) {
        self.history.push(command);
        match command {
            AnimCommand::Move => self.set_state(AnimState::Walk),
            AnimCommand::Stop => self.set_state(AnimState::Ready),
            AnimCommand::Turn => self.facing = self.facing.flipped(),
        }
    }

    fn think(&mut self, dt: f32) {
        if self.current_anim == self.state {
            return;
        }
        self.pending -= dt;
        if self.pending <= 0.0 {
            self.pending = 0.0;
            self.current_anim = self.state;
        }
    }
}
