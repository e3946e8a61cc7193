//! The style data read by the rendering backend. Styles are applied by an
//! upstream loader; the core only carries them on drawables.

use derive_more::with_trait::IsVariant;
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

pub type Rgba = [f64; 4];

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize)]
#[derive(Sequence, IsVariant)]
pub enum FillType {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDotted,
}

/// Stroke/fill parameters of one drawable. A single color entry means a
/// flat fill; multiple entries form a linear gradient along the
/// drawable's bounding box min -> max.
#[derive(Clone, Debug, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct Style {
    width: f64,
    color: Vec<Rgba>,
    fill_type: FillType,
}

impl Default for Style {
    fn default() -> Self {
        Style { width: 1.0, color: vec![[0.0, 0.0, 0.0, 1.0]], fill_type: FillType::Solid }
    }
}

impl Style {
    pub fn new(width: f64, color: Vec<Rgba>, fill_type: FillType) -> Self {
        Style { width, color, fill_type }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn color(&self) -> &[Rgba] {
        &self.color
    }

    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }
}
