pub mod conversion;
pub mod samples;
pub mod statistics;

pub use conversion::{VoltageConverter, convert, normalize};
pub use samples::{DistanceSample, MAX_COUNT, RawSample, SampleBatch};
pub use statistics::Summary;
