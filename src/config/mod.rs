pub(crate) mod badge;
pub(crate) mod font;
pub(crate) mod patch;
pub(crate) mod opts;
