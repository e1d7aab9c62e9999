//! Loading of recordings, geometry files and parameters

pub mod params;
pub mod positions;
pub mod session;
pub mod wav;

pub use session::{load_session, RecordingSession};
pub use wav::MultichannelBuffer;
