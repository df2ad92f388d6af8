pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod error;
pub mod gf;
pub mod mask;
pub mod metadata;
