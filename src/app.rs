use chrono::{DateTime, NaiveDate, Utc};
use std::path::Path;

use listenstats::core::{
    Period, StatsReport, album_stats_report, artist_stats_report, group_history,
    song_stats_report,
};
use listenstats::download::{
    ActionLabels, DownloadOverview, classify_selection, resolve_collection_action_with_labels,
    resolve_library_selection_state,
};
use listenstats::error::AppError;
use listenstats::snapshot::{Catalog, LibrarySnapshot};
use serde::Serialize;

use crate::cli::{Cli, Commands, PeriodArgs};
use crate::output::{
    StatsEntity, StatsTableOptions, collection_json, downloads_json, history_json,
    library_selection_text, print_collection_menu, print_downloads_table, print_history_table,
    print_stats_table, selection_json, selection_text, stats_json,
};
use crate::utils::{Timezone, parse_date};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) catalog: &'a Catalog,
    pub(crate) now: DateTime<Utc>,
    pub(crate) timezone: Timezone,
    pub(crate) labels: &'a ActionLabels,
}

pub(crate) fn load_catalog(snapshot: Option<&str>) -> Result<Catalog, AppError> {
    let path = snapshot.ok_or(AppError::MissingSnapshot)?;
    let snapshot = LibrarySnapshot::load(Path::new(path))?;
    log::debug!(
        "snapshot: {} songs, {} artists, {} albums, {} events",
        snapshot.songs.len(),
        snapshot.artists.len(),
        snapshot.albums.len(),
        snapshot.events.len()
    );
    Ok(snapshot.into_catalog())
}

fn handle_history(
    query: &str,
    today: Option<&str>,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let today: NaiveDate = match today {
        Some(raw) => parse_date(raw)?,
        None => ctx.now.date_naive(),
    };
    let groups = group_history(&ctx.catalog.events, &ctx.catalog.songs, today, query);
    if ctx.cli.json {
        println!("{}", history_json(&groups, ctx.timezone)?);
    } else {
        print_history_table(&groups, ctx.timezone, ctx.cli.use_color());
    }
    Ok(())
}

fn print_stats<E: StatsEntity + Serialize>(
    report: &StatsReport<E>,
    period: Period,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    if ctx.cli.json {
        let window = period.window(ctx.now);
        println!("{}", stats_json(report, period, window, ctx.cli.limit)?);
    } else {
        print_stats_table(
            report,
            StatsTableOptions {
                title: &period.label(),
                limit: ctx.cli.limit,
                use_color: ctx.cli.use_color(),
            },
        );
    }
    Ok(())
}

/// Which ranking a stats subcommand asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatsView {
    Songs,
    Artists,
    Albums,
}

impl StatsView {
    fn of(command: &Commands) -> Option<(StatsView, &PeriodArgs)> {
        match command {
            Commands::Songs(args) => Some((StatsView::Songs, args)),
            Commands::Artists(args) => Some((StatsView::Artists, args)),
            Commands::Albums(args) => Some((StatsView::Albums, args)),
            Commands::History { .. }
            | Commands::Collection { .. }
            | Commands::Selection { .. }
            | Commands::Downloads => None,
        }
    }
}

fn handle_stats(
    view: StatsView,
    args: &PeriodArgs,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let period = args.period();
    let window = period.window(ctx.now);
    log::debug!("stats window ({}, {}]", window.from, window.to);

    let catalog = ctx.catalog;
    match view {
        StatsView::Songs => {
            let report = song_stats_report(&catalog.events, &catalog.songs, window);
            print_stats(&report, period, ctx)
        }
        StatsView::Artists => {
            let report = artist_stats_report(
                &catalog.events,
                &catalog.songs,
                &catalog.song_artist_maps,
                &catalog.artists,
                window,
            );
            print_stats(&report, period, ctx)
        }
        StatsView::Albums => {
            let report =
                album_stats_report(&catalog.events, &catalog.songs, &catalog.albums, window);
            print_stats(&report, period, ctx)
        }
    }
}

fn handle_collection(
    ids: &[String],
    show_when_empty: bool,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let menu = resolve_collection_action_with_labels(
        ctx.labels,
        ids,
        &ctx.catalog.download_states,
        &ctx.catalog.downloaded_songs,
        show_when_empty,
    );
    if ctx.cli.json {
        println!("{}", collection_json(menu.as_ref())?);
    } else {
        print_collection_menu(menu.as_ref(), ctx.cli.use_color());
    }
    Ok(())
}

fn handle_selection(
    ids: &[String],
    library: bool,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let states = &ctx.catalog.download_states;
    let downloaded = &ctx.catalog.downloaded_songs;
    let output = if library {
        let state = resolve_library_selection_state(ids, states, downloaded);
        let text = library_selection_text(state);
        if ctx.cli.json {
            selection_json(state, text)?
        } else {
            text.to_string()
        }
    } else {
        let state = classify_selection(ids, states, downloaded);
        let text = selection_text(state);
        if ctx.cli.json {
            selection_json(state, text)?
        } else {
            text.to_string()
        }
    };
    println!("{output}");
    Ok(())
}

fn handle_downloads(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let overview = DownloadOverview::from_states(&ctx.catalog.download_states);
    if ctx.cli.json {
        println!("{}", downloads_json(&overview)?);
    } else {
        print_downloads_table(&overview, ctx.cli.use_color());
    }
    Ok(())
}

pub(crate) fn handle_command(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    match &ctx.cli.command {
        Commands::History { query, today } => handle_history(query, today.as_deref(), ctx),
        command @ (Commands::Songs(_) | Commands::Artists(_) | Commands::Albums(_)) => {
            match StatsView::of(command) {
                Some((view, args)) => handle_stats(view, args, ctx),
                None => unreachable!("stats command without a stats view"),
            }
        }
        Commands::Collection {
            ids,
            show_when_empty,
        } => handle_collection(ids, *show_when_empty, ctx),
        Commands::Selection { ids, library } => handle_selection(ids, *library, ctx),
        Commands::Downloads => handle_downloads(ctx),
    }
}
