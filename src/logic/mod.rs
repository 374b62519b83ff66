pub mod analysis;
pub mod comparison;
pub mod locations;
pub mod normalize;
pub mod ranking;
pub mod rules;
pub mod scanner;
pub mod seasonal;

pub use analysis::{ConnectionStatus, GeoPlant};
pub use normalize::UnitNormalizer;
pub use rules::RulesEngine;
pub use scanner::Scanner;
