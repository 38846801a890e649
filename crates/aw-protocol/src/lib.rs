pub mod envelope;
pub mod events;
pub mod sources;

pub use envelope::*;
pub use events::*;
pub use sources::*;
