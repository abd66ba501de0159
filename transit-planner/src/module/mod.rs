pub mod transit;
pub mod popularity;
pub mod ranking;
pub mod renderer;
