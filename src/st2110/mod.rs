//! ST 2110-specific typing layered on top of the generic SDP model.

pub mod audio;
pub mod data;
pub mod enums;
pub mod video;

pub use enums::{Colorimetry, Depth, PackingMode, Range, Sampling, Standard, Tcs, Tp};
pub use video::VideoDescription;
