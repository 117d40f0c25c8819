pub(crate) mod spectrum;
pub(crate) mod visualize;
pub(crate) mod wav;
