pub mod layout;
pub mod renderer;

pub use layout::BoardLayout;
pub use renderer::Renderer;
