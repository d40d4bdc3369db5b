//! Album and track command handlers.

use tabled::Tabled;

use encore_core::{Album, Catalog, Track};

use crate::cli::{AlbumArgs, AlbumCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::{self, ResourceUrl};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlbumRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Artists")]
    artists: String,
    #[tabled(rename = "Released")]
    released: String,
    #[tabled(rename = "Genre")]
    genre: String,
}

impl From<&Album> for AlbumRow {
    fn from(a: &Album) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.clone(),
            artists: a.artist_names(),
            released: util::opt(a.released.as_ref()),
            genre: a.genre.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct TrackRow {
    #[tabled(rename = "#")]
    position: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Length")]
    length: String,
}

impl From<&Track> for TrackRow {
    fn from(t: &Track) -> Self {
        Self {
            position: util::opt(t.position.as_ref()),
            id: t.id.to_string(),
            name: t.name.clone(),
            length: t.display_length(),
        }
    }
}

fn detail(a: &Album) -> String {
    let mut out = output::detail_lines(&[
        ("ID", a.id.to_string()),
        ("Name", a.name.clone()),
        ("Slug", util::opt(a.slug.as_ref())),
        ("Artists", a.artist_names()),
        ("Released", util::opt(a.released.as_ref())),
        ("Genre", util::opt(a.genre.as_ref())),
        ("Style", util::opt(a.style.as_ref())),
        ("Format", util::opt(a.format.as_ref())),
        ("Country", util::opt(a.country.as_ref())),
        ("Language", util::opt(a.language.as_ref())),
        ("Barcode", util::opt(a.barcode.as_ref())),
        ("Rating", util::opt(a.rating.as_ref())),
        ("Cover", util::opt(a.cover_url.as_ref())),
    ]);
    if !a.tracks.is_empty() {
        out.push_str("\n\n");
        out.push_str(&track_lines(&a.tracks));
    }
    out
}

fn track_lines(tracks: &[Track]) -> String {
    tracks
        .iter()
        .map(|t| {
            format!(
                "{:>3}. {} ({})",
                util::opt(t.position.as_ref()),
                t.name,
                t.display_length()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn track_detail(t: &Track) -> String {
    output::detail_lines(&[
        ("ID", t.id.to_string()),
        ("Name", t.name.clone()),
        ("Position", util::opt(t.position.as_ref())),
        ("Length", t.display_length()),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: AlbumArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AlbumCommand::Get { id, slug } => {
            let album = match (id, slug) {
                (_, Some(slug)) => catalog.album_by_slug(&slug).await?,
                (Some(id), None) => catalog.album(&id).await?,
                (None, None) => {
                    return Err(CliError::Validation {
                        field: "album".into(),
                        reason: "pass an album identifier or --slug".into(),
                    });
                }
            };
            let out = output::render_single(&global.output, &album, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlbumCommand::Url { id } => {
            let entry = ResourceUrl {
                url: catalog.album_url(&id),
                id,
            };
            let out = output::render_single(
                &global.output,
                &entry,
                |e| e.url.clone(),
                |e| e.url.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlbumCommand::List(list) => {
            let page = catalog.albums(&list.to_query()).await?;
            let out = output::render_list(
                &global.output,
                &page.items,
                |a| AlbumRow::from(a),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            util::print_page_footer(&page, global);
            Ok(())
        }

        AlbumCommand::Tracks { album_id } => {
            let tracks = catalog.album_tracks(&album_id).await?;
            let out = output::render_list(
                &global.output,
                &tracks,
                |t| TrackRow::from(t),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlbumCommand::Track { album_id, track_id } => {
            let track = catalog.album_track(&album_id, &track_id).await?;
            let out =
                output::render_single(&global.output, &track, track_detail, |t| t.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(position: u32, name: &str, length_ms: u64) -> Track {
        Track {
            id: format!("t{position}").into(),
            name: name.into(),
            position: Some(position),
            length_ms: Some(length_ms),
        }
    }

    #[test]
    fn track_lines_number_and_time() {
        let out = track_lines(&[track(1, "So What", 562_000), track(2, "Freddie Freeloader", 586_000)]);
        assert_eq!(out, "  1. So What (9:22)\n  2. Freddie Freeloader (9:46)");
    }

    #[test]
    fn track_row_shows_unknown_length() {
        let mut t = track(3, "Blue in Green", 0);
        t.length_ms = None;
        let row = TrackRow::from(&t);
        assert_eq!(row.position, "3");
        assert_eq!(row.length, "-");
    }
}
