use crate::host::{DocumentId, ViewId};
use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Invariant violations that abort one synchronization pass.
///
/// None of these ever crosses the host boundary: entry points log them via
/// `tracing` and return, degrading to "scrolling does not sync for this
/// event".
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("master {view} missing from the ordered views of {document}"))]
    MasterNotFound { view: ViewId, document: DocumentId },

    #[snafu(display("{view} reports {lines_visible} visible lines"))]
    DegenerateViewport { view: ViewId, lines_visible: i64 },
}
