pub mod filter;
pub mod options;
pub mod resampler;
pub mod summary;

pub use filter::{apply_filters, Predicate, RowFilter};
pub use options::distinct_options;
pub use resampler::{resample, Bucket, Resampled, Resampler, Series};
pub use summary::Summary;
