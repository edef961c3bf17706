pub mod assemble;
pub mod captions;
pub mod description;
pub mod formats;
pub mod localize;
pub mod reltime;
pub mod response;
pub mod storyboards;
pub mod thumbnails;
pub mod types;

pub use assemble::{assemble_video, AssembleOptions, AssembledVideo};
pub use response::RawPlayerResponse;
pub use types::{
    AdaptiveFormat, AudioTrack, Caption, CaptionTrack, FormatStream, Storyboard, StoryboardLevel,
    Thumbnail, VideoResponse,
};
