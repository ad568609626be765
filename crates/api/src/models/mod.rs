pub mod backend;
pub mod function;
pub mod hits;
pub mod inspect;
pub mod script;

pub use backend::*;
pub use function::*;
pub use hits::*;
pub use inspect::*;
pub use script::*;
