//! Static recording geometry: microphone positions and the source track

pub mod array;
pub mod track;

pub use array::MicrophoneArray;
pub use track::{SourceTrack, TrackSample};
