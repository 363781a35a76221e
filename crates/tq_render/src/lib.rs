pub mod ascii;
pub mod camera;
pub mod draw;

pub use ascii::AsciiFrame;
pub use camera::{Camera, CameraView};
pub use draw::{DrawCommand, DrawList, PaletteColor, Renderer, Sprite};
