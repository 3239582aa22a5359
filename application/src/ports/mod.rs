//! Application ports - interfaces to be implemented by outer layers

pub mod model_client;
pub mod progress;

pub use model_client::{ClientError, ModelClient};
pub use progress::{NoProgress, ProgressNotifier};
