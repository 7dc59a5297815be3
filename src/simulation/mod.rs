pub mod episode;
pub mod step;

pub use episode::{run_batch, run_episode, summarize, BatchSummary, EpisodeConfig, EpisodeReport};
pub use step::{run_tick, Organism};
