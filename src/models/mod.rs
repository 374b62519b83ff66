pub mod climate;
pub mod plant;
pub mod scan;
pub mod suitability;

pub use climate::*;
pub use plant::*;
pub use scan::*;
pub use suitability::*;
