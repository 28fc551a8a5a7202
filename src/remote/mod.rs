pub mod osc_sender;
pub mod scheduler;
