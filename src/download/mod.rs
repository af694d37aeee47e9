//! Download module - download data model and collection state resolution

mod resolver;
mod types;

pub use resolver::{
    ActionLabels, CollectionDownloadAction, CollectionDownloadMenu, LibrarySelectionState,
    SelectionState, classify_selection, resolve_collection_action,
    resolve_collection_action_with_labels, resolve_library_selection_state,
};
pub use types::{DownloadOverview, DownloadState, DownloadStatus, DownloadedSong};
