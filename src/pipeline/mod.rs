//! Windowed delay-and-sum beamforming pipeline
//!
//! The pipeline processes the recording in fixed-duration windows:
//!
//! ```text
//! read windows → mix at target gain → high-pass (carried state)
//!   → resolve source location → distance weights → delay-and-sum
//!   → stitch into continuous output streams
//! ```
//!
//! Each window depends on the previous window's filter state and trailing
//! samples, so processing is strictly sequential.

pub mod delay_sum;
pub mod filter;
pub mod scheduler;
pub mod weights;

pub use filter::{FilterState, HighPassFilter};
pub use scheduler::{run_pipeline, PipelineOutput, StreamOutput};
pub use weights::{distance_weights, ChannelWeights};
