pub(crate) mod plan;
pub(crate) mod sequence;
pub(crate) mod synth;
