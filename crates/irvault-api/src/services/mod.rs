pub mod upload;

pub use upload::{PipelineOutcome, UploadPipeline};
