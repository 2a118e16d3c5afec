use tracing::warn;

use crate::app::ports::UniformSource;
use crate::types::Region;

/// Picks one region uniformly at random. An empty list yields `None`, which is
/// a valid end state rather than a failure.
pub fn select_random<R>(regions: &[Region], source: &mut R) -> Option<Region>
where
    R: UniformSource + ?Sized,
{
    if regions.is_empty() {
        return None;
    }
    let len = regions.len();
    let mut index = source.pick_index(len);
    if index >= len {
        warn!(index, len, "Uniform source returned an out-of-range index; clamping");
        index = len - 1;
    }
    Some(regions[index].clone())
}
