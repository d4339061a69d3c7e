pub mod validation;
pub mod ledger;
pub mod router;
pub mod initialize_splitter;
pub mod update_config;
pub mod distribute_rewards;
pub mod swap_for_reward;

pub use validation::*;
pub use ledger::*;
pub use router::*;
pub use initialize_splitter::*;
pub use update_config::*;
pub use distribute_rewards::*;
pub use swap_for_reward::*;
