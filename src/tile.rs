use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Hash)]
pub struct Tile {
    pub value: u32,
}

impl Tile {
    pub const EMPTY: Tile = Tile { value: 0 };

    /// Creates a new Tile with a given value.
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Checks if the tile is empty (value 0).
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// A tile is well formed when it is empty or a power of two >= 2.
    pub fn is_valid(&self) -> bool {
        self.value == 0 || (self.value >= 2 && self.value.is_power_of_two())
    }

    /// The tile produced by merging two tiles of this value.
    pub fn merged(&self) -> Tile {
        Tile::new(self.value * 2)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
