//! swrr-balancer — smooth weighted round-robin selection.
//!
//! Picks one candidate per call out of a fixed, weighted set so that
//! over every run of `total_weight` calls each candidate is picked
//! exactly `weight` times, with heavy candidates interleaved between
//! light ones instead of picked in bursts.
//!
//! # Architecture
//!
//! ```text
//! SharedSelector<K>          (Arc<Mutex<..>>, one critical section per call)
//!   └── KeyedSelector<K>     (opaque keys, duplicate-key checks, pool config)
//!       └── Selector         (credit vector, total weight, selection step)
//!           └── Candidate    (weight + credit, crate-private transitions)
//! ```

mod candidate;
pub mod error;
pub mod keyed;
pub mod selector;
pub mod shared;

pub use error::{BalancerError, BalancerResult};
pub use keyed::KeyedSelector;
pub use selector::{Selections, Selector, cycle_plan};
pub use shared::SharedSelector;
