pub mod audio;
pub mod embedding;
pub mod metadata;
pub mod observability;
pub mod quality;
