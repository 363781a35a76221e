use glam::IVec2;

/// Hitbox width. Smaller than a tile, so an entity can straddle two tiles.
pub const ENTITY_WIDTH: i32 = 12;
/// Hitbox height.
pub const ENTITY_HEIGHT: i32 = 15;
/// Enemy slots per world.
pub const MAX_ENEMIES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> IVec2 {
        match self {
            Self::Up => IVec2::NEG_Y,
            Self::Down => IVec2::Y,
            Self::Left => IVec2::NEG_X,
            Self::Right => IVec2::X,
        }
    }
}

/// Position plus hitbox. The position is the top-left corner in world pixels
/// and may sit outside the world while crossing an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Entity {
    #[allow(dead_code)]
    pub fn new(x: i32, y: i32) -> Self {
        Self::at(IVec2::new(x, y))
    }

    pub fn at(pos: IVec2) -> Self {
        Self {
            pos,
            size: IVec2::new(ENTITY_WIDTH, ENTITY_HEIGHT),
        }
    }

    /// Strict AABB overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Entity) -> bool {
        !(other.pos.x >= self.pos.x + self.size.x
            || other.pos.x + other.size.x <= self.pos.x
            || other.pos.y >= self.pos.y + self.size.y
            || other.pos.y + other.size.y <= self.pos.y)
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::at(IVec2::ZERO)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Player {
    pub body: Entity,
    pub has_key: bool,
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Self {
            body: Entity::at(pos),
            has_key: false,
        }
    }

    pub fn pos(&self) -> IVec2 {
        self.body.pos
    }
}
