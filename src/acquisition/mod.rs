mod sample_acquirer;

pub use sample_acquirer::{DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_INTERVAL, MAX_SAMPLE_COUNT, SampleAcquirer};
