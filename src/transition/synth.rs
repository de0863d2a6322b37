use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    foundation::core::{Canvas, PixelBuffer},
    foundation::error::{XfadeError, XfadeResult},
    transition::plan::TransitionPlan,
};

/// Which kind of unit the synthesizer produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SynthMode {
    /// Materialize every intermediate frame up front.
    #[default]
    Pixel,
    /// Emit weighted image pairs and composite them when presented.
    Blend,
}

/// One image of a blend pair together with its draw opacity.
#[derive(Clone, Debug)]
pub struct BlendLayer {
    /// Normalized image, shared with the other units of the sequence.
    pub image: Arc<PixelBuffer>,
    /// Opacity in `[0, 1]`.
    pub weight: f64,
}

/// Deferred crossfade step: draw `from`, then `to`, each at its own opacity.
///
/// Invariant: `from.weight + to.weight == 1`.
#[derive(Clone, Debug)]
pub struct BlendPair {
    /// Outgoing image.
    pub from: BlendLayer,
    /// Incoming image.
    pub to: BlendLayer,
}

/// One presentable step of a transition.
#[derive(Clone, Debug)]
pub enum TransitionUnit {
    /// Fully materialized frame.
    Frame(Arc<PixelBuffer>),
    /// Weighted pair composited at present time.
    Blend(BlendPair),
}

impl TransitionUnit {
    /// Resolution this unit renders at.
    pub fn canvas(&self) -> Canvas {
        match self {
            TransitionUnit::Frame(f) => f.canvas(),
            TransitionUnit::Blend(p) => p.from.image.canvas(),
        }
    }

    /// Pixels of this unit, compositing blend pairs on demand.
    pub fn to_pixels(&self) -> XfadeResult<Arc<PixelBuffer>> {
        match self {
            TransitionUnit::Frame(f) => Ok(Arc::clone(f)),
            TransitionUnit::Blend(p) => Ok(Arc::new(composite_blend(p)?)),
        }
    }
}

fn ensure_same_canvas(from: &PixelBuffer, to: &PixelBuffer) -> XfadeResult<()> {
    if from.canvas() != to.canvas() {
        return Err(XfadeError::DimensionMismatch {
            from: from.canvas(),
            to: to.canvas(),
        });
    }
    Ok(())
}

fn ensure_step(k: u32, frames_per_segment: u32) -> XfadeResult<()> {
    if frames_per_segment == 0 || k == 0 || k > frames_per_segment {
        return Err(XfadeError::validation(format!(
            "step {k} is outside 1..={frames_per_segment}"
        )));
    }
    Ok(())
}

/// Linear per-channel interpolation at fraction `t`.
///
/// Every channel (alpha included) becomes `from + (to - from) * t`, clamped to `[0, 255]` and
/// rounded ties-to-even, the same conversion an 8-bit clamped pixel array applies.
pub fn interpolate_frame(
    from: &PixelBuffer,
    to: &PixelBuffer,
    t: f64,
) -> XfadeResult<PixelBuffer> {
    ensure_same_canvas(from, to)?;
    let data = from
        .data()
        .iter()
        .zip(to.data())
        .map(|(&a, &b)| lerp_u8(a, b, t))
        .collect();
    PixelBuffer::new(from.width(), from.height(), data)
}

/// Frame `k` of a segment with `frames_per_segment` steps; `k` starts at 1.
pub fn interpolate_step(
    from: &PixelBuffer,
    to: &PixelBuffer,
    k: u32,
    frames_per_segment: u32,
) -> XfadeResult<PixelBuffer> {
    ensure_step(k, frames_per_segment)?;
    if k == frames_per_segment {
        ensure_same_canvas(from, to)?;
        return Ok(to.clone());
    }
    interpolate_frame(from, to, f64::from(k) / f64::from(frames_per_segment))
}

/// `(weight_from, weight_to)` for step `k`: `weight_to = k / frames_per_segment`.
pub fn blend_weights(k: u32, frames_per_segment: u32) -> (f64, f64) {
    let to = if frames_per_segment == 0 {
        1.0
    } else {
        (f64::from(k) / f64::from(frames_per_segment)).clamp(0.0, 1.0)
    };
    (1.0 - to, to)
}

/// Blend descriptor for step `k`; no pixels are touched.
pub fn blend_step(
    from: &Arc<PixelBuffer>,
    to: &Arc<PixelBuffer>,
    k: u32,
    frames_per_segment: u32,
) -> XfadeResult<BlendPair> {
    ensure_step(k, frames_per_segment)?;
    ensure_same_canvas(from, to)?;
    let (wf, wt) = blend_weights(k, frames_per_segment);
    Ok(BlendPair {
        from: BlendLayer {
            image: Arc::clone(from),
            weight: wf,
        },
        to: BlendLayer {
            image: Arc::clone(to),
            weight: wt,
        },
    })
}

/// Every unit of one segment, in ascending `k`.
///
/// With `parallel` the pixel frames are computed on the rayon pool; the result is identical to
/// the serial path.
pub fn synthesize_segment(
    mode: SynthMode,
    from: &Arc<PixelBuffer>,
    to: &Arc<PixelBuffer>,
    plan: TransitionPlan,
    parallel: bool,
) -> XfadeResult<Vec<TransitionUnit>> {
    let f = plan.frames_per_segment;
    match mode {
        SynthMode::Blend => plan
            .steps()
            .map(|k| blend_step(from, to, k, f).map(TransitionUnit::Blend))
            .collect(),
        SynthMode::Pixel if parallel => plan
            .steps()
            .into_par_iter()
            .map(|k| pixel_unit(from, to, k, f))
            .collect(),
        SynthMode::Pixel => plan.steps().map(|k| pixel_unit(from, to, k, f)).collect(),
    }
}

/// The last step of a segment is the destination itself, shared rather than copied.
fn pixel_unit(
    from: &Arc<PixelBuffer>,
    to: &Arc<PixelBuffer>,
    k: u32,
    frames_per_segment: u32,
) -> XfadeResult<TransitionUnit> {
    if k == frames_per_segment {
        ensure_step(k, frames_per_segment)?;
        ensure_same_canvas(from, to)?;
        return Ok(TransitionUnit::Frame(Arc::clone(to)));
    }
    interpolate_step(from, to, k, frames_per_segment).map(|p| TransitionUnit::Frame(Arc::new(p)))
}

/// Draw `from` then `to` over a cleared surface, each scaled by its weight (source-over).
///
/// Compositing happens in premultiplied space; the result is converted back to straight RGBA.
pub fn composite_blend(pair: &BlendPair) -> XfadeResult<PixelBuffer> {
    ensure_same_canvas(&pair.from.image, &pair.to.image)?;
    let canvas = pair.from.image.canvas();
    let wf = weight_u8(pair.from.weight);
    let wt = weight_u8(pair.to.weight);

    let mut data = vec![0u8; pair.from.image.data().len()];
    for ((d, a), b) in data
        .chunks_exact_mut(4)
        .zip(pair.from.image.data().chunks_exact(4))
        .zip(pair.to.image.data().chunks_exact(4))
    {
        // Over a cleared surface the lower layer is just its scaled premultiplied value.
        let lower = scale(premultiply([a[0], a[1], a[2], a[3]]), wf);
        let upper = scale(premultiply([b[0], b[1], b[2], b[3]]), wt);
        let inv = 255 - u16::from(upper[3]);
        let out: [u8; 4] =
            std::array::from_fn(|i| upper[i].saturating_add(mul_div255(u16::from(lower[i]), inv)));
        d.copy_from_slice(&unpremultiply(out));
    }
    PixelBuffer::new(canvas.width, canvas.height, data)
}

fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + (b - a) * t).clamp(0.0, 255.0).round_ties_even() as u8
}

fn weight_u8(w: f64) -> u16 {
    (w.clamp(0.0, 1.0) * 255.0).round() as u16
}

fn scale(px: [u8; 4], w: u16) -> [u8; 4] {
    px.map(|c| mul_div255(u16::from(c), w))
}

fn premultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    [
        mul_div255(u16::from(px[0]), a),
        mul_div255(u16::from(px[1]), a),
        mul_div255(u16::from(px[2]), a),
        px[3],
    ]
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

fn mul_div255(x: u16, y: u16) -> u8 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/transition/synth.rs"]
mod tests;
