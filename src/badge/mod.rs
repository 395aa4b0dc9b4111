pub(crate) mod decal;
pub(crate) mod geometry;
pub(crate) mod paint;
pub(crate) mod pipeline;
pub(crate) mod renderer;
pub(crate) mod request;
pub(crate) mod text;
