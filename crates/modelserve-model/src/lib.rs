//! modelserve model layer
//!
//! Loads pre-trained artifacts and exposes them behind the [`Predictor`]
//! seam so the serving surfaces never depend on a concrete model format.
//!
//! Two artifact kinds are supported:
//! - safetensors weight files for the candle-backed linear models
//! - JSON parameter files for the [`StandardScaler`] preprocessing transform
//!
//! Models served by name and version live in a local [`ModelRegistry`]
//! directory; resolving an entry yields a [`Runner`] handle whose `predict`
//! forwards input to the underlying model unchanged.

pub mod artifact;
pub mod classifier;
pub mod linear;
pub mod predictor;
pub mod registry;
pub mod runner;
pub mod scaler;

pub use artifact::{array_from_tensor, tensor_from_array};
pub use classifier::LinearClassifier;
pub use linear::LinearModel;
pub use predictor::Predictor;
pub use registry::{ModelKind, ModelManifest, ModelRegistry, ResolvedModel, LATEST_TAG};
pub use runner::Runner;
pub use scaler::StandardScaler;
