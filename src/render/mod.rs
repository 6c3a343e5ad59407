pub mod renderer;

pub use renderer::{board_lines, Renderer, Scoreboard, Screen};
