//! Kernel functions for kernel matrix computation

pub mod polynomial;
pub mod rbf;
pub mod traits;

pub use self::polynomial::*;
pub use self::rbf::*;
pub use self::traits::Kernel;
