pub(crate) mod row;
pub(crate) mod span;
