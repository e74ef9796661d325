pub mod pointer;
pub mod resize;

pub use pointer::wire_orbit_input;
pub use resize::wire_resize;
