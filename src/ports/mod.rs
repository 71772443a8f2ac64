pub mod spotify;
pub mod tidal;
