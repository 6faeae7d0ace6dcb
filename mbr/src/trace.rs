//! Trace hook
//!
//! With the `trace` feature the firmware provides `morpheus_log`; without
//! it every call compiles away.

#[cfg(feature = "trace")]
extern "C" {
    fn morpheus_log(msg: *const u8, len: usize);
}

#[cfg(feature = "trace")]
pub(crate) fn trace(msg: &str) {
    unsafe { morpheus_log(msg.as_ptr(), msg.len()) };
}

#[cfg(not(feature = "trace"))]
#[inline(always)]
pub(crate) fn trace(_msg: &str) {}
