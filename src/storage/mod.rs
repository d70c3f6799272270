pub mod container;
pub mod error;
pub mod local;
pub mod memory;

pub use container::*;
pub use error::*;
pub use local::*;
pub use memory::*;
