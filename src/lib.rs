//! Version 1 QR code generator for alphanumeric data.
//!
//! Encodes up to 24 alphanumeric characters (digits, uppercase letters and
//! the symbols ` $%*+-./:`) into a 21x21 QR matrix with Reed-Solomon error
//! correction. Lowercase input is folded to uppercase.
//!
//! # Example
//!
//! ```
//! let qr = qrlite::generate("HELLO WORLD").unwrap();
//! let image = qr.to_image(10);
//! # assert_eq!(image.dimensions(), (290, 290));
//! ```

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub mod common;

pub use builder::qr::QR;
pub use builder::{generate, QRBuilder};
pub use common::error::{QRError, QRResult};
pub use common::mask::{calculate_format_bits, MaskPattern};
pub use common::metadata::{Color, ECLevel, MATRIX_SIZE};
