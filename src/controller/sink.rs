//! Outbound contract with the rendering side.

/// Receives the clip that should be playing.
///
/// Called whenever the effective clip changes. `None` means nothing should
/// play. Any `FnMut(Option<&str>, f64) + Send` closure is a sink.
pub trait ClipSink: Send {
    fn request_active_clip(&mut self, clip: Option<&str>, blend_secs: f64);
}

impl<F> ClipSink for F
where
    F: FnMut(Option<&str>, f64) + Send,
{
    fn request_active_clip(&mut self, clip: Option<&str>, blend_secs: f64) {
        self(clip, blend_secs)
    }
}

/// Sink that discards every request, for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ClipSink for NullSink {
    fn request_active_clip(&mut self, _clip: Option<&str>, _blend_secs: f64) {}
}
