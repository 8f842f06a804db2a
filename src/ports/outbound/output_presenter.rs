use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts where the run summary or the exported snapshot ends
/// up (stdout, a file).
pub trait OutputPresenter {
    /// Presents `content` at the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
