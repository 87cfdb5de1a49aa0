pub mod colors;
pub mod command;
pub mod content;
pub mod error;
pub mod layers;
pub mod parser;
pub mod state;
mod helpers;

pub use colors::{ColorSpec, Palette, Rgba};
pub use command::{Command, Shape};
pub use content::{Bounds, Frame, Primitive, PrimitiveKind, Primitives};
pub use error::{Error, RecordError, Result};
pub use layers::LayerMask;
pub use parser::{Diagnostic, FrameParser};
pub use state::DrawState;
