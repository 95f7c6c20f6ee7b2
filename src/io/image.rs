//! PNG export of a solved layout with a per-item colour palette

use crate::io::configuration::HARD_BLOCK_SCORE;
use crate::io::error::{LayoutError, Result, invalid_parameter};
use crate::spatial::RoomGrid;
use image::{ImageBuffer, Rgb, RgbImage};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Colour of hard-blocked cells
pub const BLOCKED_COLOR: [u8; 3] = [0, 0, 0];
/// Colour of empty cells and of occupants missing from the palette
pub const EMPTY_COLOR: [u8; 3] = [255, 255, 255];

/// Mapping from item name to display colour
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: HashMap<String, [u8; 3]>,
}

impl Default for Palette {
    /// Colours for the stock furniture catalog
    fn default() -> Self {
        let mut palette = Self::empty();
        palette.insert("Bed", [211, 211, 211]);
        palette.insert("DeskAndChair", [186, 140, 99]);
        palette.insert("Couch", [161, 61, 45]);
        palette.insert("Shelf", [115, 147, 179]);
        palette.insert("Light", [255, 255, 0]);
        palette
    }
}

impl Palette {
    /// Palette with no entries
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
        }
    }

    /// Set the colour of an item name, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, rgb: [u8; 3]) {
        self.colors.insert(name.into(), rgb);
    }

    /// Colour registered for an item name
    pub fn color_for(&self, name: &str) -> Option<[u8; 3]> {
        self.colors.get(name).copied()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Test if no colours are registered
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// `NAME=R,G,B` colour override from the command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorAssignment {
    /// Item name
    pub name: String,
    /// Colour channels
    pub rgb: [u8; 3],
}

impl FromStr for ColorAssignment {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self> {
        let (name, channels) = text
            .split_once('=')
            .ok_or_else(|| invalid_parameter("color", &text, &"expected NAME=R,G,B"))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(invalid_parameter("color", &text, &"missing item name"));
        }

        let values = channels
            .split(',')
            .map(|channel| channel.trim().parse::<u8>())
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|e| invalid_parameter("color", &text, &e))?;

        let rgb: [u8; 3] = values
            .try_into()
            .map_err(|values: Vec<u8>| {
                invalid_parameter(
                    "color",
                    &text,
                    &format!("expected three channels, got {}", values.len()),
                )
            })?;

        Ok(Self {
            name: name.to_string(),
            rgb,
        })
    }
}

/// Colour of one cell: hard-blocked cells are black, empty cells white, and
/// soft cells take the palette colour of their topmost occupant
fn cell_color(grid: &RoomGrid, x: usize, y: usize, palette: &Palette) -> Result<[u8; 3]> {
    let cell = grid.cell(x, y)?;
    if cell.collision_score >= HARD_BLOCK_SCORE {
        return Ok(BLOCKED_COLOR);
    }
    if cell.collision_score == 0 {
        return Ok(EMPTY_COLOR);
    }
    Ok(grid
        .topmost_occupant(x, y)?
        .and_then(|name| palette.color_for(name))
        .unwrap_or(EMPTY_COLOR))
}

/// Render the grid with one pixel per cell
///
/// Pixel `(x, y)` shows cell `(x, y)`, so the image is `length` pixels wide
/// and `width` pixels tall.
///
/// # Errors
///
/// Returns `InvalidParameter` if the grid does not fit in an image
pub fn render_layout(grid: &RoomGrid, palette: &Palette) -> Result<RgbImage> {
    let pixels_wide = u32::try_from(grid.length())
        .map_err(|e| invalid_parameter("length", &grid.length(), &e))?;
    let pixels_tall =
        u32::try_from(grid.width()).map_err(|e| invalid_parameter("width", &grid.width(), &e))?;

    let mut img: RgbImage = ImageBuffer::new(pixels_wide, pixels_tall);
    for (pixel_x, pixel_y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb(cell_color(
            grid,
            pixel_x as usize,
            pixel_y as usize,
            palette,
        )?);
    }

    Ok(img)
}

/// Render the grid and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The grid is too large to render
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_layout_as_png(grid: &RoomGrid, palette: &Palette, output_path: &Path) -> Result<()> {
    let img = render_layout(grid, palette)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LayoutError::Io {
            path: parent.to_path_buf(),
            action: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| LayoutError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
