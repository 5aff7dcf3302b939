mod fusion_error;
mod input_error;
mod lodestone_error;
mod upstream_error;

pub use fusion_error::FusionError;
pub use input_error::InputError;
pub use lodestone_error::{LodestoneError, LodestoneResult};
pub use upstream_error::UpstreamError;
