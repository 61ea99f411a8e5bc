pub mod rent;

pub use rent::*;
