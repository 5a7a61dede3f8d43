pub mod cmake;
pub mod errors;
pub mod logging;
pub mod misc;
