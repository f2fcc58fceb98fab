pub mod grid;
pub mod input;
pub mod mode;
pub mod pulse;
pub mod view;
