// SPDX-License-Identifier: MIT

//! Services module - the interaction logic layer.

pub mod controller;

pub use controller::{ControllerState, InteractionController};
