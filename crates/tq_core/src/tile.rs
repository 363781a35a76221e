/// Tile semantics. The discriminant is the code stored in the world grid,
/// so it must stay below 16 for packed storage to work.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TileType {
    /// Also what any pixel outside the world reads as.
    #[default]
    Water = 0,
    Green = 1,
    Tree = 2,
    Grass = 3,
    Brick = 4,
    DoorClosed = 5,
    DoorOpen = 6,
    Key = 7,
    Carpet = 8,
}

impl TileType {
    /// All tile types in code order.
    pub const ALL: &'static [TileType] = &[
        TileType::Water,
        TileType::Green,
        TileType::Tree,
        TileType::Grass,
        TileType::Brick,
        TileType::DoorClosed,
        TileType::DoorOpen,
        TileType::Key,
        TileType::Carpet,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a stored value. Unknown codes decode as `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Green, Carpet and an open door can be walked on. Everything else blocks.
    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Green | Self::Carpet | Self::DoorOpen)
    }

    /// Single-character glyph used by world pack rows and text dumps.
    pub fn glyph(self) -> char {
        match self {
            Self::Water => '~',
            Self::Green => '.',
            Self::Tree => 'T',
            Self::Grass => ',',
            Self::Brick => '#',
            Self::DoorClosed => 'D',
            Self::DoorOpen => 'O',
            Self::Key => 'K',
            Self::Carpet => '=',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.glyph() == glyph)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Green => "green",
            Self::Tree => "tree",
            Self::Grass => "grass",
            Self::Brick => "brick",
            Self::DoorClosed => "closed door",
            Self::DoorOpen => "open door",
            Self::Key => "key",
            Self::Carpet => "carpet",
        }
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkable_set_is_green_carpet_open_door() {
        let walkable: Vec<TileType> = TileType::ALL
            .iter()
            .copied()
            .filter(|t| t.is_walkable())
            .collect();
        assert_eq!(
            walkable,
            vec![TileType::Green, TileType::DoorOpen, TileType::Carpet]
        );
    }

    #[test]
    fn codes_match_table_order() {
        for (i, &tile) in TileType::ALL.iter().enumerate() {
            assert_eq!(tile.code() as usize, i);
            assert_eq!(TileType::from_code(tile.code()), Some(tile));
        }
        assert_eq!(TileType::from_code(9), None);
    }

    #[test]
    fn every_code_fits_in_a_nibble() {
        assert!(TileType::ALL.iter().all(|t| t.code() < 16));
    }

    #[test]
    fn glyphs_are_unique_and_reversible() {
        for &tile in TileType::ALL {
            assert_eq!(TileType::from_glyph(tile.glyph()), Some(tile));
        }
        assert_eq!(TileType::from_glyph('?'), None);
    }
}
