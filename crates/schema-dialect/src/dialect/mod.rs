//! Engine-neutral parsing of native column type descriptors.
//!
//! Catalogs describe a column type as a single string such as
//! `"int(11) unsigned zerofill"` or `"DECIMAL(11,2)"`. [`NativeType`] splits
//! that into a base keyword, up to two integer arguments, and trailing
//! modifiers, leaving the classification to each dialect.

mod native;

pub use native::NativeType;
