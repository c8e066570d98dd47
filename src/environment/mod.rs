mod collaborators;
mod reference;

pub use collaborators::*;
pub use reference::*;
