use comfy_table::{Cell, Color};

use listenstats::core::{Album, Artist, HistoryGroup, Song, StatsReport};
use listenstats::download::{
    CollectionDownloadAction, CollectionDownloadMenu, DownloadOverview, DownloadStatus,
    LibrarySelectionState, SelectionState,
};

use crate::output::format::{
    create_styled_table, dim, format_bytes, format_duration_ms, format_number, header_cell,
    right_cell, styled_cell,
};
use crate::utils::Timezone;

/// Columns a ranked entity contributes to the stats table
pub(crate) trait StatsEntity {
    const KIND: &'static str;
    const DETAIL: Option<&'static str>;
    fn name(&self) -> &str;
    fn detail(&self) -> String;
}

impl StatsEntity for Song {
    const KIND: &'static str = "Song";
    const DETAIL: Option<&'static str> = Some("Artist");

    fn name(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> String {
        self.artist_name.clone().unwrap_or_default()
    }
}

impl StatsEntity for Artist {
    const KIND: &'static str = "Artist";
    const DETAIL: Option<&'static str> = None;

    fn name(&self) -> &str {
        &self.name
    }

    fn detail(&self) -> String {
        String::new()
    }
}

impl StatsEntity for Album {
    const KIND: &'static str = "Album";
    const DETAIL: Option<&'static str> = Some("Year");

    fn name(&self) -> &str {
        &self.title
    }

    fn detail(&self) -> String {
        self.year.map(|y| y.to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct StatsTableOptions<'a> {
    pub(crate) title: &'a str,
    pub(crate) limit: Option<usize>,
    pub(crate) use_color: bool,
}

fn print_summary_line(valid: u64, skipped: u64) {
    println!(
        "\n  {} plays counted ({} without a catalog match)\n",
        format_number(valid),
        format_number(skipped)
    );
}

pub(crate) fn print_stats_table<E: StatsEntity>(report: &StatsReport<E>, opts: StatsTableOptions) {
    let c = opts.use_color;
    println!("\n  {} - {}\n", E::KIND, opts.title);

    if report.rows.is_empty() {
        println!("  No plays in this period.");
        print_summary_line(report.valid, report.skipped);
        return;
    }

    let mut table = create_styled_table();
    let mut header = vec![header_cell("#", c), header_cell(E::KIND, c)];
    if let Some(detail) = E::DETAIL {
        header.push(header_cell(detail, c));
    }
    header.extend([header_cell("Plays", c), header_cell("Time", c)]);
    table.set_header(header);

    let shown = opts.limit.unwrap_or(report.rows.len());
    for (rank, row) in report.rows.iter().take(shown).enumerate() {
        let mut cells = vec![
            right_cell(&(rank + 1).to_string(), dim(c), false),
            styled_cell(row.entity.name(), None, rank == 0),
        ];
        if E::DETAIL.is_some() {
            cells.push(styled_cell(&row.entity.detail(), dim(c), false));
        }
        cells.extend([
            right_cell(&format_number(row.play_count), None, false),
            right_cell(
                &format_duration_ms(row.time_listened_ms),
                c.then_some(Color::Green),
                false,
            ),
        ]);
        table.add_row(cells);
    }

    let total = report.total();
    let mut footer = vec![
        Cell::new(""),
        styled_cell("TOTAL", c.then_some(Color::Yellow), true),
    ];
    if E::DETAIL.is_some() {
        footer.push(Cell::new(""));
    }
    footer.extend([
        right_cell(
            &format_number(total.play_count),
            c.then_some(Color::Yellow),
            true,
        ),
        right_cell(
            &format_duration_ms(total.time_listened_ms),
            c.then_some(Color::Yellow),
            true,
        ),
    ]);
    table.add_row(footer);

    println!("{table}");
    if shown < report.rows.len() {
        println!("  ... {} more", report.rows.len() - shown);
    }
    print_summary_line(report.valid, report.skipped);
}

pub(crate) fn print_history_table(groups: &[HistoryGroup], tz: Timezone, use_color: bool) {
    if groups.is_empty() {
        println!("\n  No listening history.\n");
        return;
    }

    let c = use_color;
    for group in groups {
        println!(
            "\n  {}",
            if c {
                format!("\x1b[1;36m{}\x1b[0m", group.bucket.label())
            } else {
                group.bucket.label()
            }
        );
        let mut table = create_styled_table();
        table.set_header(vec![
            header_cell("Last played", c),
            header_cell("Title", c),
            header_cell("Artist", c),
            header_cell("Listened", c),
        ]);
        for row in &group.rows {
            table.add_row(vec![
                styled_cell(&tz.format(row.event.timestamp, "%Y-%m-%d %H:%M"), dim(c), false),
                Cell::new(&row.song.title),
                Cell::new(row.song.artist_name.as_deref().unwrap_or("")),
                right_cell(&format_duration_ms(row.event.play_time_ms), None, false),
            ]);
        }
        println!("{table}");
    }
    println!("\n  Times shown in {}\n", tz.name());
}

pub(crate) fn print_collection_menu(menu: Option<&CollectionDownloadMenu>, use_color: bool) {
    let Some(menu) = menu else {
        println!("No download action (empty collection)");
        return;
    };
    let color = match menu.action {
        CollectionDownloadAction::Download => Color::Green,
        CollectionDownloadAction::Cancel => Color::Yellow,
        CollectionDownloadAction::Remove => Color::Red,
    };
    if use_color {
        println!("{}", styled_line(&menu.label, color));
    } else {
        println!("{}", menu.label);
    }
}

fn styled_line(text: &str, color: Color) -> String {
    let code = match color {
        Color::Green => "32",
        Color::Yellow => "33",
        Color::Red => "31",
        _ => "0",
    };
    format!("\x1b[{code}m{text}\x1b[0m")
}

pub(crate) fn selection_text(state: SelectionState) -> &'static str {
    match state {
        SelectionState::None => "Nothing selected",
        SelectionState::Completed => "All downloaded",
        SelectionState::Downloading => "Downloading",
        SelectionState::NotDownloaded => "Not downloaded",
    }
}

pub(crate) fn library_selection_text(state: LibrarySelectionState) -> &'static str {
    match state {
        LibrarySelectionState::Downloaded => "All downloaded",
        LibrarySelectionState::Downloading => "Downloading",
        LibrarySelectionState::NotDownloaded => "Not downloaded",
    }
}

pub(crate) fn print_downloads_table(overview: &DownloadOverview, use_color: bool) {
    if overview.is_empty() {
        println!("\n  No active or failed downloads.\n");
        return;
    }

    let c = use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Song", c),
        header_cell("Title", c),
        header_cell("Artist", c),
        header_cell("Status", c),
    ]);

    for state in overview.active.iter().chain(&overview.failed) {
        let color = match state.status {
            DownloadStatus::Failed => Color::Red,
            DownloadStatus::Paused => Color::Yellow,
            _ => Color::Green,
        };
        table.add_row(vec![
            styled_cell(&state.song_id, dim(c), false),
            Cell::new(&state.title),
            Cell::new(&state.artist),
            styled_cell(&state.status_text(), c.then_some(color), false),
        ]);
    }

    println!("{table}");
    println!(
        "\n  {} active ({} / {}), {} failed\n",
        overview.active.len(),
        format_bytes(overview.active_downloaded_bytes),
        format_bytes(overview.active_total_bytes),
        overview.failed.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_columns() {
        let song = Song::new("s1", "Intro").with_artist("Band");
        assert_eq!(song.name(), "Intro");
        assert_eq!(song.detail(), "Band");

        let mut album = Album::new("al1", "Debut");
        assert_eq!(album.detail(), "");
        album.year = Some(1999);
        assert_eq!(album.detail(), "1999");

        assert_eq!(Artist::new("a1", "Band").name(), "Band");
    }

    #[test]
    fn selection_texts_are_distinct() {
        let texts = [
            selection_text(SelectionState::None),
            selection_text(SelectionState::Completed),
            selection_text(SelectionState::Downloading),
            selection_text(SelectionState::NotDownloaded),
        ];
        for (i, a) in texts.iter().enumerate() {
            for b in &texts[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(
            library_selection_text(LibrarySelectionState::Downloaded),
            selection_text(SelectionState::Completed)
        );
    }

    #[test]
    fn styled_line_wraps_ansi() {
        assert_eq!(styled_line("x", Color::Red), "\x1b[31mx\x1b[0m");
    }
}
