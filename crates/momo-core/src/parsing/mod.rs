pub mod header;
pub mod normalize;
pub mod values;
