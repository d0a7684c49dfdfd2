pub mod config_io;
pub mod outline_io;
pub mod state;
