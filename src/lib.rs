pub mod error;
pub mod generate;
pub mod matrix;
pub mod params;
pub mod rescale;
pub mod table;

pub use error::{Result, SortingHatError};
pub use generate::{generate_feature, generate_feature_seeded, FeatureSpec};
pub use params::{ClassParam, ClassParameters, ClassRecord};
pub use rescale::{rescale, rescale_checked, RescaleAxis};
pub use table::SampledTable;
