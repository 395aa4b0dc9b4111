/// CPU raster surface.
pub mod cpu;
/// Rendered pixel output.
pub mod frame;
/// Command-recording surface.
pub mod recording;
/// The surface abstraction the badge pipeline paints into.
pub mod surface;
