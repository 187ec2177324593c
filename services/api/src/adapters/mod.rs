pub mod clock;
pub mod rng;
pub mod session_file;

pub use clock::TokioClock;
pub use rng::{SeededRandom, StdRandom};
pub use session_file::SessionFileStore;
