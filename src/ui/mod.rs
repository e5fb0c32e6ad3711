pub mod console;
pub mod context;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
