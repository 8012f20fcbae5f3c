pub mod classifier;
pub mod enrichment;
pub mod evidence;
pub mod segmenter;
pub mod tokens;
