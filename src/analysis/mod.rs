//! Objective comparison statistics: SNR and speech intelligibility

pub mod intelligibility;
pub mod result;
pub mod snr;

pub use intelligibility::{intelligibility_index, IntelligibilityStats};
pub use result::{BeamformReport, ReportMetadata};
pub use snr::{best_channel_snr_db, mean_power, snr_db, target_gain};
