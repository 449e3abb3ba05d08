mod emission;
mod error;


pub use emission::EmissionPipeline;
pub use error::PipelineError;
