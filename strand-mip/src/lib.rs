//! Cutting-plane separation for the strand MIP solver.
//!
//! The centerpiece is the aggregation path separator: starting from each
//! tight relaxation row it builds weighted combinations of rows by walking
//! a column-induced adjacency over the continuous variables, substituting
//! forced continuous columns away, and handing every intermediate
//! aggregation to a cut generator. Accepted inequalities land in the cut
//! pool.
//!
//! Everything here runs synchronously within one invocation and shares no
//! state across invocations except the deterministic derivation of the
//! tie-break random generator, so results reproduce for a fixed relaxation
//! trajectory.

pub mod aggregator;
pub mod cutgen;
pub mod path_separator;
pub mod pool;
pub mod settings;
pub mod transformed;

pub use aggregator::LpAggregator;
pub use cutgen::{Cut, CutGenerator, MirCutGenerator};
pub use path_separator::{PathSeparator, SeparationStats};
pub use pool::CutPool;
pub use settings::SeparatorSettings;
pub use transformed::TransformedLp;
