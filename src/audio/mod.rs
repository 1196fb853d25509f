pub mod decode;
pub mod mix;
pub mod spectrum;
pub mod weighting;
