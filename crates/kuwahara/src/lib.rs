#![doc = include_str!("../../../README.md")]

#[doc(inline)]
pub use kuwahara_image as image;

#[doc(inline)]
pub use kuwahara_imgproc as imgproc;

#[doc(inline)]
pub use kuwahara_io as io;
