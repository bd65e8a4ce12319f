// Application layer - Use case interactors

pub mod batch_interactor;
pub mod container;
pub mod convert_interactor;
pub mod inspect_interactor;

// Re-export interactors
pub use batch_interactor::{BatchInteractor, BatchRequest};
pub use convert_interactor::{ConversionJob, ConversionSettings, ConvertInteractor};
pub use inspect_interactor::{InspectEntry, InspectInteractor};
