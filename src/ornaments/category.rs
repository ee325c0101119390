use crate::scene::palette;

/// The three instanced ornament populations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Heavy boxes, few of them
    Gifts,
    /// Medium spheres
    Baubles,
    /// Light emissive octahedra, twinkling
    Lights,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Gifts, Category::Baubles, Category::Lights];

    pub fn name(self) -> &'static str {
        match self {
            Category::Gifts => "gifts",
            Category::Baubles => "baubles",
            Category::Lights => "lights",
        }
    }

    pub fn palette(self) -> &'static [u32] {
        match self {
            Category::Gifts => palette::GIFT_COLORS,
            Category::Baubles => palette::BAUBLE_COLORS,
            Category::Lights => palette::LIGHT_COLORS,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Category::Gifts => 0,
            Category::Baubles => 1,
            Category::Lights => 2,
        }
    }

    /// Lookup by the index exposed to JavaScript
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
