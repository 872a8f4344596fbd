pub(crate) mod model;
pub(crate) mod placement;
pub(crate) mod view;
