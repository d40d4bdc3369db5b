//! Artist command handlers.

use tabled::Tabled;

use encore_core::{Artist, Catalog};

use crate::cli::{ArtistArgs, ArtistCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::{self, ResourceUrl};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ArtistRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Area")]
    area: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Albums")]
    albums: usize,
}

impl From<&Artist> for ArtistRow {
    fn from(a: &Artist) -> Self {
        Self {
            id: a.id.to_string(),
            name: a.name.clone(),
            area: a.area.clone().unwrap_or_default(),
            active: active_span(a),
            albums: a.albums.len(),
        }
    }
}

/// `1926 - 1991`, `1926 -`, or empty.
fn active_span(a: &Artist) -> String {
    match (a.begin_date, a.end_date) {
        (Some(begin), Some(end)) => format!("{} - {}", begin.format("%Y"), end.format("%Y")),
        (Some(begin), None) => format!("{} -", begin.format("%Y")),
        (None, Some(end)) => format!("- {}", end.format("%Y")),
        (None, None) => String::new(),
    }
}

fn detail(a: &Artist) -> String {
    let albums = a
        .albums
        .iter()
        .map(|al| al.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    output::detail_lines(&[
        ("ID", a.id.to_string()),
        ("Name", a.name.clone()),
        ("Slug", util::opt(a.slug.as_ref())),
        ("Gender", util::opt(a.gender.as_ref())),
        ("Area", util::opt(a.area.as_ref())),
        ("Begin", util::opt(a.begin_date.as_ref())),
        ("End", util::opt(a.end_date.as_ref())),
        ("IPI", util::opt(a.ipi.as_ref())),
        ("ISNI", util::opt(a.isni.as_ref())),
        ("Rating", util::opt(a.rating.as_ref())),
        ("Image", util::opt(a.image_url.as_ref())),
        ("Albums", albums),
    ])
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: ArtistArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ArtistCommand::Get { id } => {
            let artist = catalog.artist(&id).await?;
            let out = output::render_single(&global.output, &artist, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ArtistCommand::Url { id } => {
            let entry = ResourceUrl {
                url: catalog.artist_url(&id),
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

        ArtistCommand::List(list) => {
            let page = catalog.artists(&list.to_query()).await?;
            let out = output::render_list(
                &global.output,
                &page.items,
                |a| ArtistRow::from(a),
                |a| a.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            util::print_page_footer(&page, global);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn artist() -> Artist {
        Artist {
            id: "42".into(),
            name: "Miles Davis".into(),
            slug: None,
            gender: None,
            area: Some("United States".into()),
            begin_date: NaiveDate::from_ymd_opt(1926, 5, 26),
            end_date: NaiveDate::from_ymd_opt(1991, 9, 28),
            ipi: None,
            isni: None,
            image_url: None,
            rating: None,
            albums: Vec::new(),
        }
    }

    #[test]
    fn active_span_uses_years() {
        let mut a = artist();
        assert_eq!(active_span(&a), "1926 - 1991");
        a.end_date = None;
        assert_eq!(active_span(&a), "1926 -");
    }

    #[test]
    fn detail_skips_unknown_fields() {
        let out = detail(&artist());
        assert!(out.contains("Miles Davis"));
        assert!(out.contains("1926-05-26"));
        assert!(!out.contains("ISNI"));
    }
}
