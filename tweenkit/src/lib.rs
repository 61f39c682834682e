#![doc(html_root_url = "https://docs.rs/tweenkit/0.1.0")]

//! <h1 align="center">TWEENKIT - The Rust property tweening toolkit</h1>
//! <div style="text-align:center;font-style:italic;">Tweenkit is an open-source tweening engine for animating object properties over time - written in Rust.</div>
//! <br/>
//!
//! # Features
//!
//! **Tweenkit** is a Rust library that animates the properties of arbitrary objects
//! (position, rotation, scale, size, opacity) between two values over time, shaped
//! by an easing curve.
//!
//! - Describe an animation with a [`TweenDescriptor`](tweens::TweenDescriptor): bounds, duration, delay,
//!   [`Easing`](tweens::Easing) curve and [`LoopMode`](tweens::LoopMode)
//! - Play it deterministically through a [`TweenScheduler`](tweens::TweenScheduler), ticked by your own
//!   clock or by a runtime task at a fixed rate
//! - Attach a [`Tweener`](tweens::Tweener) to any [`Target`](targets::Target) for the full controller
//!   behaviour: play, stop, automatic return to the origin, events
//!
//! # Getting Started
//!
//! - Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! tweenkit = "0.1.0"
//! ```
//!
//! The following code demonstrates the simplest program we could imagine: slide a
//! panel 120 units to the right over half a second.
//! ```rust
//! use tweenkit::mocks::target::MockTarget;
//! use tweenkit::targets::TweenKind;
//! use tweenkit::tweens::{Easing, TweenScheduler, Tweener};
//! use tweenkit::utils::Vec3;
//!
//! let scheduler = TweenScheduler::default();
//! let panel = MockTarget::new();
//!
//! let slide = Tweener::new(&scheduler, panel.clone(), TweenKind::Move)
//!     .set_to(Vec3::new(120.0, 0.0, 0.0))
//!     .set_duration(0.5)
//!     .set_easing(Easing::QuadOut);
//!
//! slide.play().unwrap();
//!
//! // Advance time: the last tick lands exactly on the destination.
//! scheduler.tick(0.25);
//! scheduler.tick(0.25);
//! assert_eq!(panel.get_position(), Vec3::new(120.0, 0.0, 0.0));
//! ```
//!
//! # Feature flags
//!
//! - **serde** -- Enables serialize/deserialize capabilities for most entities.

#[cfg(test)]
extern crate self as tweenkit;

pub mod errors;
pub mod mocks;
pub mod targets;
pub mod tweens;
pub mod utils;

pub use tweenkit_macros::runtime;
