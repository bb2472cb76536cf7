pub(crate) mod driver;
pub(crate) mod face;
pub(crate) mod timer;
