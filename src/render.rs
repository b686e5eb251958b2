//! Plain text export of a voxel grid, one block of rows per layer.
//!
//! ```text
//! Layer 1
//! b bb
//! ...
//! ```

use std::{fmt::Display, io::Write};

use tracing::debug;

use crate::{
    Result,
    layout::{CellKind, VoxelGrid},
};

/// Glyphs used by [`TextRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    pub empty: char,
    pub solid: char,
    pub conductor: char,
    pub inverter: char,
    pub refresher: char,
    pub actuator: char,
    /// Writes a `Layer N` line before each layer, counting from 1.
    pub layer_headers: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            empty: ' ',
            solid: 'b',
            conductor: 'w',
            inverter: 't',
            refresher: 'r',
            actuator: 'l',
            layer_headers: true,
        }
    }
}

impl RenderStyle {
    pub fn glyph(&self, kind: CellKind) -> char {
        match kind {
            CellKind::Empty => self.empty,
            CellKind::Solid => self.solid,
            CellKind::Conductor => self.conductor,
            CellKind::Inverter(_) => self.inverter,
            CellKind::Refresher(_) => self.refresher,
            CellKind::LightActuator => self.actuator,
        }
    }
}

/// Something a finished grid can be handed to.
pub trait Exporter {
    fn export(&mut self, grid: &VoxelGrid) -> Result<()>;
}

/// Writes the grid as text, bottom layer first.
pub struct TextRenderer<W: Write> {
    out: W,
    style: RenderStyle,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer {
            out,
            style: RenderStyle::default(),
        }
    }

    pub fn with_style(out: W, style: RenderStyle) -> Self {
        TextRenderer { out, style }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_grid(
    f: &mut impl std::fmt::Write,
    grid: &VoxelGrid,
    style: &RenderStyle,
) -> std::fmt::Result {
    for (l, layer) in grid.layers().iter().enumerate() {
        if style.layer_headers {
            writeln!(f, "Layer {}", l + 1)?;
        }
        for row in layer {
            let line: String = row.iter().map(|&k| style.glyph(k)).collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// A grid paired with the style to draw it with.
struct Styled<'a> {
    grid: &'a VoxelGrid,
    style: &'a RenderStyle,
}

impl Display for Styled<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_grid(f, self.grid, self.style)
    }
}

impl<W: Write> Exporter for TextRenderer<W> {
    fn export(&mut self, grid: &VoxelGrid) -> Result<()> {
        let styled = Styled {
            grid,
            style: &self.style,
        };
        write!(self.out, "{}", styled)?;
        self.out.flush()?;
        debug!(cells = grid.len(), "grid exported as text");
        Ok(())
    }
}

impl Display for VoxelGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_grid(f, self, &RenderStyle::default())
    }
}
