pub mod component;
pub mod form;
pub mod variable;

pub use component::*;
pub use form::*;
pub use variable::*;
