pub mod personalities;

pub use personalities::*;
