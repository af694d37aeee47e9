use serde::Serialize;
use serde_json::{Value, json};

use listenstats::core::{HistoryGroup, Period, StatsReport, StatsWindow};
use listenstats::download::{CollectionDownloadMenu, DownloadOverview};
use listenstats::error::AppError;

use crate::utils::Timezone;

fn to_pretty(value: &Value) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(crate) fn history_json(groups: &[HistoryGroup], tz: Timezone) -> Result<String, AppError> {
    let output: Vec<Value> = groups
        .iter()
        .map(|group| {
            let rows: Vec<Value> = group
                .rows
                .iter()
                .map(|row| {
                    json!({
                        "song_id": row.song.id,
                        "title": row.song.title,
                        "artist": row.song.artist_name,
                        "timestamp": row.event.timestamp.to_rfc3339(),
                        "local_time": tz.format(row.event.timestamp, "%Y-%m-%d %H:%M"),
                        "play_time_ms": row.event.play_time_ms,
                    })
                })
                .collect();
            json!({
                "label": group.bucket.label(),
                "bucket": group.bucket,
                "rows": rows,
            })
        })
        .collect();
    to_pretty(&Value::Array(output))
}

pub(crate) fn stats_json<E: Serialize>(
    report: &StatsReport<E>,
    period: Period,
    window: StatsWindow,
    limit: Option<usize>,
) -> Result<String, AppError> {
    let shown = limit.unwrap_or(report.rows.len());
    let total = report.total();
    let output = json!({
        "period": {
            "label": period.label(),
            "mode": period.mode(),
            "index": period.index(),
            "from": window.from.to_rfc3339(),
            "to": window.to.to_rfc3339(),
        },
        "rows": report.rows.iter().take(shown).collect::<Vec<_>>(),
        "total": total,
        "valid": report.valid,
        "skipped": report.skipped,
    });
    to_pretty(&output)
}

pub(crate) fn collection_json(menu: Option<&CollectionDownloadMenu>) -> Result<String, AppError> {
    to_pretty(&json!({ "menu": menu }))
}

pub(crate) fn selection_json<S: Serialize>(state: S, text: &str) -> Result<String, AppError> {
    to_pretty(&json!({ "state": state, "text": text }))
}

pub(crate) fn downloads_json(overview: &DownloadOverview) -> Result<String, AppError> {
    let entry = |state: &&listenstats::download::DownloadState| {
        json!({
            "song_id": state.song_id,
            "title": state.title,
            "artist": state.artist,
            "status": state.status,
            "progress": state.progress(),
            "status_text": state.status_text(),
        })
    };
    let output = json!({
        "active": overview.active.iter().map(entry).collect::<Vec<_>>(),
        "failed": overview.failed.iter().map(entry).collect::<Vec<_>>(),
        "active_downloaded_bytes": overview.active_downloaded_bytes,
        "active_total_bytes": overview.active_total_bytes,
    });
    to_pretty(&output)
}
