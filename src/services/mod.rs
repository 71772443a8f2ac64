pub mod matching;
pub mod playlist;
pub mod spotify;
pub mod tidal;
pub mod transfer;
