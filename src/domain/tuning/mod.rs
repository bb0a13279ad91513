pub mod pair;
pub mod stability;
