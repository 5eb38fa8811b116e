//! Buffer bookkeeping shared by the one-shot codec and the stream engine.
//!
//! - [`BufferCursor`]: a fixed-capacity staging region with independent
//!   `size` (valid bytes) and `position` (consumed bytes) marks, used for
//!   both the input and output sides of an incremental transform.
//! - [`FrameBuffer`]: the owned, growable result of a one-shot call, whose
//!   logical length is tracked separately from its writable capacity.

pub mod cursor;
pub mod frame_buffer;

pub use cursor::BufferCursor;
pub use frame_buffer::FrameBuffer;
