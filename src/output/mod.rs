mod format;
mod json;
mod table;

pub(crate) use json::{collection_json, downloads_json, history_json, selection_json, stats_json};
pub(crate) use table::{
    StatsEntity, StatsTableOptions, library_selection_text, print_collection_menu,
    print_downloads_table, print_history_table, print_stats_table, selection_text,
};
