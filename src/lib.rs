pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod player;
pub mod server;
pub mod upstream;

pub use config::Config;
pub use error::ApiError;
pub use player::{assemble_video, AssembleOptions, AssembledVideo, RawPlayerResponse, VideoResponse};
