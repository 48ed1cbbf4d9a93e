pub mod gemini;
pub mod image;
pub mod tryon;

pub use self::image::*;
pub use self::tryon::*;
