pub(crate) mod orchestrator;
pub(crate) mod pipeline;
pub(crate) mod signal;
