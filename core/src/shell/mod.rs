pub mod audio;
pub mod input;
pub mod menu;
pub mod session;
pub mod timing;
pub mod video;
