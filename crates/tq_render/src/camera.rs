use glam::IVec2;

/// Edge-clamped follow camera.
///
/// Each axis is handled on its own. While the focus is within half a screen of
/// a world edge the view is pinned to that edge; otherwise the focus sits at the
/// screen center. The two outputs always agree:
/// `draw_position(p) == p + viewport_offset(p)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub screen: IVec2,
    pub world: IVec2,
}

/// Everything the render pass needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraView {
    /// Translation from world pixels to screen pixels.
    pub offset: IVec2,
    /// Where the focused entity lands on screen.
    pub focus: IVec2,
}

impl Camera {
    pub fn new(screen: IVec2, world: IVec2) -> Self {
        Self { screen, world }
    }

    pub fn viewport_offset(&self, pos: IVec2) -> IVec2 {
        IVec2::new(
            axis_offset(pos.x, self.screen.x, self.world.x),
            axis_offset(pos.y, self.screen.y, self.world.y),
        )
    }

    pub fn draw_position(&self, pos: IVec2) -> IVec2 {
        IVec2::new(
            axis_draw(pos.x, self.screen.x, self.world.x),
            axis_draw(pos.y, self.screen.y, self.world.y),
        )
    }

    pub fn view(&self, focus: IVec2) -> CameraView {
        CameraView {
            offset: self.viewport_offset(focus),
            focus: self.draw_position(focus),
        }
    }
}

impl CameraView {
    pub fn to_screen(&self, world_pos: IVec2) -> IVec2 {
        world_pos + self.offset
    }
}

fn axis_offset(pos: i32, screen: i32, world: i32) -> i32 {
    let half = screen / 2;
    if pos < half {
        0
    } else if pos > world - half {
        screen - world
    } else {
        half - pos
    }
}

fn axis_draw(pos: i32, screen: i32, world: i32) -> i32 {
    let half = screen / 2;
    if pos < half {
        pos
    } else if pos > world - half {
        pos - (world - screen)
    } else {
        half
    }
}
