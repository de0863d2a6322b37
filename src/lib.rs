//! xfade turns a sequence of images into a deterministic crossfade animation.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: encoded bytes -> [`ImageSource`], strictly in input order ([`load_sources`])
//! 2. **Normalize**: every source sampled at one shared [`Canvas`] ([`normalize`])
//! 3. **Plan**: duration and frame rate -> frames per segment ([`plan_transition`])
//! 4. **Synthesize**: one [`TransitionUnit`] per step, eagerly, for every adjacent pair
//!    ([`build_sequence`])
//! 5. **Play**: [`PlaybackScheduler`] presents one unit per tick through a [`Presenter`]
//!
//! [`TransitionSession`] owns steps 1-5 for one prepare/play cycle.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same inputs and settings always yield the same units, serial or
//!   parallel.
//! - **Straight RGBA8** end-to-end: buffers hold non-premultiplied pixels.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod normalize;
mod playback;
mod present;
mod session;
mod transition;

pub use assets::decode::{ImageCrateDecoder, ImageDecoder, decode_image, load_sources, read_inputs};
pub use assets::source::{FitMode, ImageSource, PixelSampler};
pub use foundation::core::{Canvas, PixelBuffer};
pub use foundation::error::{XfadeError, XfadeResult};
pub use foundation::settings::TransitionSettings;
pub use normalize::pass::{NormalizedImages, normalize, target_resolution};
pub use playback::scheduler::{
    Generation, PlaybackHandle, PlaybackReport, PlaybackScheduler, PlaybackState, TickOutcome,
};
pub use playback::ticker::{ImmediateTicker, IntervalTicker, TickSource};
pub use present::sink::{InMemoryPresenter, PngSequencePresenter, Presenter};
pub use session::transition_session::TransitionSession;
pub use transition::plan::{TransitionPlan, plan_from_settings, plan_transition};
pub use transition::sequence::{
    SequenceOpts, TransitionSequence, build_from_normalized, build_sequence,
};
pub use transition::synth::{
    BlendLayer, BlendPair, SynthMode, TransitionUnit, blend_step, blend_weights, composite_blend,
    interpolate_frame, interpolate_step, synthesize_segment,
};
