mod backend;
mod controller;
mod cursor;
mod fade;
mod interpolate;
mod snapshot;

pub use backend::*;
pub use controller::*;
pub use cursor::*;
pub use fade::*;
pub use interpolate::*;
pub use snapshot::*;


#[cfg(test)]
mod interpolate_tests;




#[cfg(test)]
mod lifecycle_tests;

#[cfg(test)]
mod snapshot_tests;
