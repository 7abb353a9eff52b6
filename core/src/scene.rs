//! Scene
//!
//! The engine object. A [`Scene`] owns the console tree, the text items,
//! the list order, and both animation engines, and is the only thing a
//! surface talks to:
//!
//! ```text
//! frame tick ──► Scene::tick(dt)
//!                  ├─ MotionEngine::advance      (moves consoles)
//!                  │    └─ finished paths ──► fades for their texts
//!                  └─ ColorAnimationEngine::advance (recolors texts)
//! draw ────────► Scene::render(&mut impl Renderer)
//! key press ───► Scene::reorder(rng)
//! ```
//!
//! All state lives here and is mutated only through `&mut Scene`, so a
//! reorder can only land between ticks, never in the middle of one.

use std::time::Duration;

use rand::Rng;

use crate::animation::{AnimationType, AnimationTypeId, ColorAnimationEngine};
use crate::choreographer::{ListChoreographer, ListItem};
use crate::color::Rgb;
use crate::config::SceneConfig;
use crate::console::{ConsoleId, ConsoleTree, Layout, TextId, TextItem};
use crate::error::{EngineError, Result};
use crate::motion::MotionEngine;

/// Drawing surface consumed by [`Scene::render`]
///
/// Coordinates are absolute grid cells and may fall outside the surface
/// (a console peeling left of column 0, for instance); implementations
/// skip what they cannot show.
pub trait Renderer {
    /// Blank the whole surface
    fn clear(&mut self);

    /// Draw one glyph
    fn draw_glyph(&mut self, col: i32, row: i32, glyph: char, fg: Rgb, bg: Rgb);
}

/// Consoles, texts, list order and running animations
#[derive(Debug)]
pub struct Scene {
    consoles: ConsoleTree,
    texts: Vec<TextItem>,
    list: ListChoreographer,
    motion: MotionEngine,
    fades: ColorAnimationEngine,
    animation_types: Vec<AnimationType>,
    settle_animation: AnimationTypeId,
    list_console: ConsoleId,
    row_layout: Layout,
}

impl Scene {
    /// Build an empty list from configuration
    ///
    /// Creates the list console and the static labels. Rows are added
    /// afterwards with [`Scene::push_row`].
    pub fn new(config: &SceneConfig) -> Result<Self> {
        config.validate()?;

        let mut consoles = ConsoleTree::new();
        let list_console = consoles.add_root(config.list.layout());

        let mut scene = Self {
            consoles,
            texts: Vec::new(),
            list: ListChoreographer::new(config.reorder.policy()),
            motion: MotionEngine::new(),
            fades: ColorAnimationEngine::new(),
            animation_types: config.animation_types.clone(),
            settle_animation: AnimationTypeId(config.default_animation_type),
            list_console,
            row_layout: config.list.row_layout(),
        };

        for label in &config.labels {
            let text = TextItem::from_spec(list_console, &label.text, label.color, label.anchor)?
                .with_background(label.background)
                .with_top(label.top);
            scene.add_text(text)?;
        }

        tracing::info!(
            animation_types = scene.animation_types.len(),
            labels = config.labels.len(),
            "Scene created"
        );

        Ok(scene)
    }

    /// Add a row console at the bottom of the list
    pub fn push_row(&mut self) -> Result<ConsoleId> {
        let top = i32::try_from(self.list.len()).unwrap_or(i32::MAX);
        let layout = Layout {
            top: self.row_layout.top + top,
            ..self.row_layout
        };

        let console = self.consoles.add_child(self.list_console, layout)?;
        self.list.push(ListItem { console, weight: 0 });
        Ok(console)
    }

    /// Add a text bound to one of this scene's consoles
    pub fn add_text(&mut self, text: TextItem) -> Result<TextId> {
        if !self.consoles.contains(text.console) {
            return Err(EngineError::UnknownConsole(text.console));
        }
        let id = TextId(self.texts.len());
        self.texts.push(text);
        Ok(id)
    }

    /// Advance all animations by `dt`
    pub fn tick(&mut self, dt: Duration) {
        let settled = self.motion.advance(dt, &mut self.consoles);

        for console in settled {
            for (index, text) in self.texts.iter().enumerate() {
                if text.console == console {
                    self.fades.spawn(self.settle_animation, TextId(index));
                }
            }
        }

        self.fades.advance(dt, &self.animation_types, &mut self.texts);
    }

    /// Shuffle the list and queue moves; returns the number queued
    pub fn reorder<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.list.reorder(&self.consoles, &mut self.motion, rng)
    }

    /// Draw every text at its resolved position
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.clear();

        for text in &self.texts {
            let Some(origin) = self.consoles.resolve_text_position(text) else {
                continue;
            };

            for (line_no, line) in text.content.split('\n').enumerate() {
                let row = origin.row + i32::try_from(line_no).unwrap_or(i32::MAX);
                let mut col = origin.col;
                for glyph in line.chars() {
                    renderer.draw_glyph(col, row, glyph, text.color, text.background);
                    col += glyph_width(glyph);
                }
            }
        }
    }

    /// Whether any move or fade is still running
    pub fn is_animating(&self) -> bool {
        !self.motion.is_empty() || !self.fades.is_empty()
    }

    pub fn consoles(&self) -> &ConsoleTree {
        &self.consoles
    }

    pub fn list_console(&self) -> ConsoleId {
        self.list_console
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn text(&self, id: TextId) -> Option<&TextItem> {
        self.texts.get(id.0)
    }

    pub fn list(&self) -> &ListChoreographer {
        &self.list
    }

    pub fn motion(&self) -> &MotionEngine {
        &self.motion
    }

    pub fn fades(&self) -> &ColorAnimationEngine {
        &self.fades
    }
}

fn glyph_width(glyph: char) -> i32 {
    let width = unicode_width::UnicodeWidthChar::width(glyph).unwrap_or(0);
    i32::try_from(width.max(1)).unwrap_or(1)
}
