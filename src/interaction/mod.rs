//! # Pointer Interaction Module
//!
//! Pointer-driven picking and dragging for the Brae scene playground.
//!
//! ## Key Components
//!
//! - [`PointerTracker`] - Converts raw screen coordinates into normalized
//!   device coordinates, tracked on two independent channels (press and move)
//! - [`DragController`] - The press/drag/release state machine built on top
//!   of the pointer tracker and the picking engine
//!
//! ## Threading contract
//!
//! Everything in this module is touched only from the winit event thread.
//! Input callbacks and the per-frame tick run to completion without
//! reentrancy, so no synchronization is needed (or used).

pub mod drag;
pub mod pointer;

// Re-export main types
pub use drag::{DragController, DragState};
pub use pointer::{PointerSample, PointerTracker};
