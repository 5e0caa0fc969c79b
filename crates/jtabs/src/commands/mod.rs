//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod copy;
pub(crate) mod inspect;

pub(crate) use build::BuildArgs;
pub(crate) use copy::CopyArgs;
pub(crate) use inspect::InspectArgs;
