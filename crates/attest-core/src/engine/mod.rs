pub mod runner;
pub mod sequencer;

pub use runner::CaseRunner;
pub use sequencer::ActionSequencer;
