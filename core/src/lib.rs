//! Reflow Core - Headless Reorder Animation Engine
//!
//! This crate lays out a list of text rows on a cell grid and animates
//! reordering it: rows glide along rectangular detours to their new slots
//! and flash a highlight color that fades back to their own color. It has
//! no terminal, no async runtime and never reads the clock; a surface
//! feeds it frame deltas and draws what it renders.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Surface                             │
//! │   frame driver ── dt ──┐     key ──┐      ┌── Renderer impl  │
//! └────────────────────────┼───────────┼──────┼──────────────────┘
//!                          ▼           ▼      │
//! ┌────────────────────────────────────────────────────────────┐
//! │                         Scene                               │
//! │  ┌──────────────┐  ┌────────────────┐  ┌────────────────┐  │
//! │  │ ConsoleTree  │◄─│  MotionEngine  │◄─│ListChoreographer│  │
//! │  │ + TextItems  │  └───────┬────────┘  └────────────────┘  │
//! │  │              │          │ finished paths               │
//! │  │              │◄─┌───────▼──────────────┐               │
//! │  └──────────────┘  │ ColorAnimationEngine │               │
//! │                    └──────────────────────┘               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Scene`]: owns every console, text and running animation
//! - [`ConsoleTree`]: nested rectangles and absolute position resolution
//! - [`MotionEngine`]: steps consoles along [`MovePath`]s
//! - [`ColorAnimationEngine`]: runs highlight fades on texts
//! - [`ListChoreographer`]: weighted shuffle, sort and move scheduling
//! - [`SceneConfig`]: layout, tuning and the animation type table
//!
//! # Quick Start
//!
//! ```ignore
//! use std::time::Instant;
//! use reflow_core::{FrameClock, Scene, SceneConfig};
//!
//! let config = reflow_core::config::load_config()?;
//! let mut scene = Scene::new(&config)?;
//! let row = scene.push_row()?;
//! // ... add texts to `row` ...
//!
//! let mut clock = FrameClock::new();
//! loop {
//!     scene.tick(clock.tick(Instant::now()));
//!     scene.render(&mut my_renderer);
//! }
//! ```

pub mod animation;
pub mod choreographer;
pub mod clock;
pub mod color;
pub mod config;
pub mod console;
pub mod error;
pub mod motion;
pub mod path;
pub mod scene;

pub use animation::{
    AnimationType, AnimationTypeId, ColorAnimation, ColorAnimationEngine, ColorEffect, Lifetime,
    RateFunction,
};
pub use choreographer::{ListChoreographer, ListItem, ReorderPolicy};
pub use clock::FrameClock;
pub use color::{blend, Rgb};
pub use config::{ConfigError, ConfigSource, SceneConfig};
pub use console::{
    display_width, Anchor, AnchorSpec, Console, ConsoleId, ConsoleTree, Layout, Position, TextId,
    TextItem,
};
pub use error::{EngineError, Result};
pub use motion::{MotionEngine, MovePath};
pub use path::{generate_path, net_displacement, Step};
pub use scene::{Renderer, Scene};
