// Shared token parsers and the start/end decision procedure
pub mod base;

// One normalizer per site
pub mod fubon;
pub mod huashan;
pub mod moca;
pub mod npm;
pub mod ntnu;
pub mod songshan;
pub mod tfam;

pub use base::DateTokenUtils;
pub use fubon::FubonDates;
pub use huashan::HuashanDates;
pub use moca::MocaDates;
pub use npm::NpmDates;
pub use ntnu::NtnuDates;
pub use songshan::SongshanDates;
pub use tfam::TfamDates;
