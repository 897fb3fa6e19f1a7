use crate::error::TailError;
use crate::reader::{Cursor, StreamEntry};

/// Where the tail loop fetches entries from. Rendering never touches the source.
#[allow(async_fn_in_trait)]
pub trait EntrySource {
    /// Entries strictly after `cursor`, at most `count`, oldest first.
    async fn read_batch(
        &mut self,
        cursor: &Cursor,
        count: usize,
    ) -> Result<Vec<StreamEntry>, TailError>;

    async fn reconnect(&mut self) -> Result<(), TailError>;
}
