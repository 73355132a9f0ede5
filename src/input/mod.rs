pub mod handler;
pub mod resolver;

pub use handler::{InputHandler, KeyAction, PointerAction};
pub use resolver::{DirectionResolver, key_direction};
