pub mod challenge;

pub use challenge::{ChallengeStore, MemoryChallengeStore};
