//! Immutable descriptors of placeable rectangles
//!
//! Items are defined once, up front, and never change afterwards. The text
//! form `LENGTHxWIDTH:NAME:CLASS` (for example `80x140:Bed:1`) is accepted
//! wherever items are supplied as strings.

use crate::io::configuration::WALL_NAME;
use crate::io::error::{LayoutError, Result, invalid_parameter};
use std::fmt;
use std::str::FromStr;

/// Contribution of an item to the collision score of each cell it covers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollisionClass {
    /// Never collides and adds nothing to a cell's score
    Ghost,
    /// May overlap ghost items but not another soft or hard item
    Soft,
    /// Wall-like; blocks every non-ghost item
    Hard,
}

impl CollisionClass {
    /// Score added to every covered cell
    pub const fn weight(self) -> u32 {
        match self {
            Self::Ghost => 0,
            Self::Soft => 1,
            Self::Hard => 2,
        }
    }

    /// Map a numeric class (0, 1 or 2) back to its variant
    pub const fn from_weight(weight: u32) -> Option<Self> {
        match weight {
            0 => Some(Self::Ghost),
            1 => Some(Self::Soft),
            2 => Some(Self::Hard),
            _ => None,
        }
    }
}

impl TryFrom<u32> for CollisionClass {
    type Error = LayoutError;

    fn try_from(weight: u32) -> Result<Self> {
        Self::from_weight(weight).ok_or_else(|| {
            invalid_parameter("collision_class", &weight, &"expected 0, 1 or 2")
        })
    }
}

/// A rectangle to be placed in the room
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Item {
    length: usize,
    width: usize,
    name: String,
    collision_class: CollisionClass,
}

impl Item {
    /// Create an item, rejecting zero dimensions and empty names
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or the name is empty
    pub fn new(
        length: usize,
        width: usize,
        name: impl Into<String>,
        collision_class: CollisionClass,
    ) -> Result<Self> {
        let name = name.into();
        if length == 0 {
            return Err(invalid_parameter("length", &length, &"must be positive"));
        }
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"must be positive"));
        }
        if name.trim().is_empty() {
            return Err(invalid_parameter("name", &name, &"must not be empty"));
        }
        Ok(Self {
            length,
            width,
            name,
            collision_class,
        })
    }

    /// The single-cell hard item seeded along the room perimeter
    pub fn wall() -> Self {
        Self {
            length: 1,
            width: 1,
            name: WALL_NAME.to_string(),
            collision_class: CollisionClass::Hard,
        }
    }

    /// Extent along the x (row) axis
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Extent along the y (column) axis
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Name used for display and for matching rules
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collision class of the item
    pub const fn collision_class(&self) -> CollisionClass {
        self.collision_class
    }

    /// Number of cells covered
    pub const fn area(&self) -> usize {
        self.length * self.width
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}:{}:{}",
            self.length,
            self.width,
            self.name,
            self.collision_class.weight()
        )
    }
}

impl FromStr for Item {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self> {
        let mut parts = text.splitn(3, ':');
        let (Some(size), Some(name), Some(class)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid_parameter(
                "item",
                &text,
                &"expected LENGTHxWIDTH:NAME:CLASS",
            ));
        };

        let (length, width) = size
            .split_once(['x', 'X'])
            .ok_or_else(|| invalid_parameter("item", &text, &"size must look like 80x140"))?;
        let length = parse_dimension(length.trim(), text)?;
        let width = parse_dimension(width.trim(), text)?;

        let class = class
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid_parameter("collision_class", &class, &e))?;

        Self::new(length, width, name.trim(), CollisionClass::try_from(class)?)
    }
}

fn parse_dimension(value: &str, text: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|e| invalid_parameter("item", &text, &format!("bad dimension '{value}': {e}")))
}

/// Reorder items so the largest areas come first
///
/// The sort is stable, so items of equal area keep their relative order.
pub fn sort_by_area_descending(items: &mut [Item]) {
    items.sort_by(|a, b| b.area().cmp(&a.area()));
}

/// The stock furniture set: a bed, a desk with chair, a ceiling light, a
/// couch and a shelf, sized in grid units
pub fn furniture_catalog() -> Vec<Item> {
    [
        (80, 140, "Bed", CollisionClass::Soft),
        (60, 90, "DeskAndChair", CollisionClass::Soft),
        (10, 10, "Light", CollisionClass::Ghost),
        (30, 40, "Couch", CollisionClass::Soft),
        (80, 30, "Shelf", CollisionClass::Soft),
    ]
    .into_iter()
    .map(|(length, width, name, collision_class)| Item {
        length,
        width,
        name: name.to_string(),
        collision_class,
    })
    .collect()
}
