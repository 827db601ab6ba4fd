pub mod device;
pub mod hub;

pub use device::{select_device, select_dtype};
