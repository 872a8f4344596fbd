pub(crate) mod hit;
pub(crate) mod session;
