//! Planning domain models.
//!
//! Core data types for study planning problems and their solutions.
//!
//! # Domain Mappings
//!
//! | study-planner | Job-shop term | Meaning |
//! |---------------|---------------|---------|
//! | StudyTask | Job | Effort with a due date and priority |
//! | DayCapacity | Resource calendar | Hours free per day |
//! | Plan | Schedule | Hours placed per day |
//! | Shortfall | Deadline miss | Effort left unplaced at the due date |

mod capacity;
mod plan;
mod task;

pub use capacity::{CapacityPolicy, DayCapacity};
pub use plan::{Allocation, Plan, PlanOutcome, Shortfall};
pub use task::StudyTask;
