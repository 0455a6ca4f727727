extern crate bio;
extern crate bio_types;
extern crate csv;
extern crate crc;
extern crate linked_hash_map;
extern crate rusqlite;

pub mod seq;
pub mod align;
pub mod variant;
pub mod orf;
pub mod analysis;
pub mod history;
pub mod io;
pub mod config;
pub mod validate;
pub mod error;

pub mod constants;

pub use align::{align, align_with, Alignment, Scoring};
pub use error::{Error, Result};
pub use orf::{find_orfs, Orf};
pub use seq::{reverse_complement, translate};
pub use variant::{call_variants, Variant, VariantCall};
