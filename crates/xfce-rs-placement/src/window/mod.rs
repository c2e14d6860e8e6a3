pub mod cursors;
pub mod desktop;
pub mod error;
pub mod frame;
pub mod input_mode;
pub mod interactive;
pub mod manager;
pub mod output;
pub mod placement;
pub mod resistance;
pub mod seat;
pub mod view;
