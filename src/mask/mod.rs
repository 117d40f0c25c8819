pub(crate) mod build;
pub(crate) mod grid;
pub(crate) mod locate;
