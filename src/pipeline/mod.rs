//! The observation-and-coordination pipeline: change detection, request
//! coordination with stale-response reconciliation, and the agent loop that
//! ties them to a host page.

pub mod agent;
pub mod coordinator;
pub mod detector;
pub mod requests;

pub use agent::{Agent, AgentCommand, AgentHandle, AgentOptions};
pub use coordinator::{Coordinator, Reaction};
pub use detector::{ChangeDetector, DetectorEvent};
pub use requests::{Completion, Epoch, Outbound};
