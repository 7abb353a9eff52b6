//! Console Tree
//!
//! Consoles are positioned rectangles nested inside each other. A console's
//! layout offsets are relative to its parent, so moving a parent carries
//! every descendant and every text bound to them along with it.
//!
//! # Ownership
//!
//! The tree owns every console in an append-only arena. Children refer to
//! their parent through an optional [`ConsoleId`]; a root has `None`.
//! A parent must already exist when a child is added, so the parent graph
//! is a finite tree by construction. Consoles are never removed, which
//! keeps every issued id valid for the lifetime of the tree.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::color::Rgb;
use crate::error::{EngineError, Result};

/// Handle to a console in a [`ConsoleTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsoleId(usize);

impl ConsoleId {
    /// Arena index of this console
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a text item in a [`Scene`](crate::Scene)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextId(pub(crate) usize);

impl TextId {
    /// Arena index of this text item
    pub fn index(self) -> usize {
        self.0
    }
}

/// Size and offset of a console, in grid cells
///
/// `left`/`top` are relative to the parent's origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub left: i32,
    pub top: i32,
}

impl Layout {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }
}

/// An absolute grid position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// A positioned rectangle node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Console {
    /// Parent console (None for a root)
    pub parent: Option<ConsoleId>,
    /// Size and parent-relative offset
    pub layout: Layout,
}

/// Append-only arena of consoles
#[derive(Clone, Debug, Default)]
pub struct ConsoleTree {
    consoles: Vec<Console>,
}

impl ConsoleTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a console with no parent
    pub fn add_root(&mut self, layout: Layout) -> ConsoleId {
        self.push(Console {
            parent: None,
            layout,
        })
    }

    /// Add a console nested inside `parent`
    pub fn add_child(&mut self, parent: ConsoleId, layout: Layout) -> Result<ConsoleId> {
        if !self.contains(parent) {
            return Err(EngineError::UnknownConsole(parent));
        }
        Ok(self.push(Console {
            parent: Some(parent),
            layout,
        }))
    }

    fn push(&mut self, console: Console) -> ConsoleId {
        let id = ConsoleId(self.consoles.len());
        self.consoles.push(console);
        id
    }

    /// Whether `id` was issued by this tree
    pub fn contains(&self, id: ConsoleId) -> bool {
        id.0 < self.consoles.len()
    }

    pub fn get(&self, id: ConsoleId) -> Option<&Console> {
        self.consoles.get(id.0)
    }

    /// Mutable access to a console's layout
    pub fn layout_mut(&mut self, id: ConsoleId) -> Option<&mut Layout> {
        self.consoles.get_mut(id.0).map(|c| &mut c.layout)
    }

    pub fn len(&self) -> usize {
        self.consoles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consoles.is_empty()
    }

    /// Absolute origin of a console
    ///
    /// Sums `left`/`top` over the console and all of its ancestors.
    pub fn resolve_position(&self, id: ConsoleId) -> Option<Position> {
        let mut pos = Position::default();
        let mut current = Some(self.get(id)?);

        while let Some(console) = current {
            pos.col += console.layout.left;
            pos.row += console.layout.top;
            current = console.parent.and_then(|parent| self.get(parent));
        }

        Some(pos)
    }

    /// Absolute position of a text's first glyph
    pub fn resolve_text_position(&self, text: &TextItem) -> Option<Position> {
        let origin = self.resolve_position(text.console)?;
        let owner = self.get(text.console)?;

        let col = match text.anchor {
            Anchor::Left(offset) => offset,
            Anchor::Right(offset) => owner.layout.width - text.width() - offset,
        };

        Some(Position::new(origin.col + col, origin.row + text.top))
    }
}

/// How a text is pinned horizontally inside its console
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Offset from the console's left edge
    Left(i32),
    /// Offset of the text's last cell from the console's right edge
    Right(i32),
}

/// Unvalidated anchor as it appears in configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSpec {
    pub left: Option<i32>,
    pub right: Option<i32>,
}

impl TryFrom<AnchorSpec> for Anchor {
    type Error = EngineError;

    fn try_from(spec: AnchorSpec) -> Result<Self> {
        match (spec.left, spec.right) {
            (Some(left), None) => Ok(Anchor::Left(left)),
            (None, Some(right)) => Ok(Anchor::Right(right)),
            (None, None) => Err(EngineError::MissingAnchor),
            (Some(_), Some(_)) => Err(EngineError::ConflictingAnchor),
        }
    }
}

/// A line of content bound to one console
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextItem {
    /// Owning console
    pub console: ConsoleId,
    /// Text to draw (`\n` starts a new row)
    pub content: String,
    /// Background color
    pub background: Rgb,
    /// Current foreground color
    pub color: Rgb,
    /// Base color captured the first time a fade touches this text
    pub original_color: Option<Rgb>,
    /// Horizontal pin
    pub anchor: Anchor,
    /// Row offset inside the console
    pub top: i32,
}

impl TextItem {
    /// Create a text on black, pinned by `anchor`
    pub fn new(console: ConsoleId, content: impl Into<String>, color: Rgb, anchor: Anchor) -> Self {
        Self {
            console,
            content: content.into(),
            background: Rgb::BLACK,
            color,
            original_color: None,
            anchor,
            top: 0,
        }
    }

    /// Create a text from an unvalidated anchor
    ///
    /// Fails with [`EngineError::MissingAnchor`] or
    /// [`EngineError::ConflictingAnchor`] unless exactly one side is set.
    pub fn from_spec(
        console: ConsoleId,
        content: impl Into<String>,
        color: Rgb,
        anchor: AnchorSpec,
    ) -> Result<Self> {
        Ok(Self::new(console, content, color, Anchor::try_from(anchor)?))
    }

    #[must_use]
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: i32) -> Self {
        self.top = top;
        self
    }

    /// Display width of the content in cells
    pub fn width(&self) -> i32 {
        display_width(&self.content)
    }

    /// Color the text rests at when no fade is running
    pub fn base_color(&self) -> Rgb {
        self.original_color.unwrap_or(self.color)
    }
}

/// Display width of a string in grid cells
pub fn display_width(s: &str) -> i32 {
    i32::try_from(s.width()).unwrap_or(i32::MAX)
}
