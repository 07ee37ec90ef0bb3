//! Left-to-right screen ordering of a document's views.

use crate::{
    geometry::PixelPoint,
    host::{Host, ViewId},
};
use smallvec::SmallVec;

/// Order `views` by on-screen position: screen X ascending, then screen Y,
/// with the id as a final deterministic tie-break.
///
/// Views that are not showing, or that report no screen position, are
/// excluded up front rather than treated as ties: a view without valid
/// geometry must never be selected as a propagation neighbor.
pub fn screen_order<I>(host: &dyn Host, views: I) -> SmallVec<[ViewId; 4]>
where
    I: IntoIterator<Item = ViewId>,
{
    let mut placed: SmallVec<[(PixelPoint, ViewId); 4]> = views
        .into_iter()
        .filter_map(|id| {
            let view = host.view(id)?;
            if !view.is_showing() {
                return None;
            }
            let at = view.screen_position()?;
            Some((at, id))
        })
        .collect();

    placed.sort_unstable_by_key(|&(at, id)| (at.x, at.y, id));
    placed.into_iter().map(|(_, id)| id).collect()
}
