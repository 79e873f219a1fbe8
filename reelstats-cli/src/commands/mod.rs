pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod dashboard;
pub(crate) mod fetch;
pub(crate) mod lookup;
pub(crate) mod prepare;
