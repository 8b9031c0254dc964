//! Pipeline module - loading, rough-set analysis and reduction steps

pub mod approximation;
pub mod consistency;
pub mod error;
pub mod loader;
pub mod method;
pub mod partition;
pub mod qualitative;
pub mod quantitative;
pub mod reducer;
pub mod rules;
pub mod table;
pub mod trace;

pub use approximation::*;
pub use consistency::*;
pub use error::AnalysisError;
pub use loader::*;
pub use method::*;
pub use partition::*;
pub use qualitative::*;
pub use quantitative::*;
pub use reducer::*;
pub use rules::*;
pub use table::*;
pub use trace::*;
