//! Stimulus-Aligned Window Segmentation
//!
//! Turns a continuous recording into fixed-length windows aligned to
//! stimulus onsets, each tagged with a raw stimulus temperature and a raw
//! cumulative pain-rating sum, then derives dense class labels from the raw
//! tags.

mod edges;
mod error;
mod labels;
mod segmenter;

pub use edges::rising_edges;
pub use error::{LabelError, SegmentError};
pub use labels::{derive_labels, Labels, RATING_CLASSES};
pub use segmenter::{
    segment, segment_and_label, LabeledDataset, SegmentConfig, Segmentation, Window,
};
