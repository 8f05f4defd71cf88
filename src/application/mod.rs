//! Application layer: the protocol drivers for both parties and final commit.

pub mod finality;
pub mod initiator;
pub mod lifecycle;
pub mod responder;

pub use finality::FinalityCommitter;
pub use initiator::Initiator;
pub use lifecycle::{CompositeObserver, NoopObserver, ProtocolObserver};
pub use responder::Responder;
