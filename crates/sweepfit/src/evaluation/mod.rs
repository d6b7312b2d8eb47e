//! Layer 4: Evaluation - derived physical metrics.

pub mod drift;
pub mod flicker;
pub mod saturation;
pub mod snr;
pub mod transfer;
