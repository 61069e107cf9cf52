use std::fmt::Write;

use catalog_core::{BrowseViewModel, CharacterDetailView, SortOrder, ViewMode};

use super::constants::{GRID_CELL_WIDTH, GRID_COLUMNS};

fn favorite_marker(is_favorite: bool) -> &'static str {
    if is_favorite {
        "[*]"
    } else {
        "[ ]"
    }
}

pub fn render_browse(view: &BrowseViewModel) -> String {
    let mut out = String::new();
    let title = match &view.query {
        Some(query) => format!("Characters starting with \"{query}\""),
        None => "Characters".to_string(),
    };
    let mode = match view.view_mode {
        ViewMode::List => "list",
        ViewMode::Grid => "grid",
    };
    let order = match view.sort_order {
        SortOrder::NameAsc => "name asc",
        SortOrder::NameDesc => "name desc",
    };
    let _ = writeln!(out, "== {title} ({mode}, {order}) ==");

    if view.busy {
        let _ = writeln!(out, "Loading...");
    } else if view.rows.is_empty() {
        let _ = writeln!(out, "No characters.");
    }

    match view.view_mode {
        ViewMode::List => {
            for row in &view.rows {
                let _ = writeln!(
                    out,
                    "{} {:>8}  {}  (series: {})",
                    favorite_marker(row.is_favorite),
                    row.id,
                    row.name,
                    row.series_count
                );
            }
        }
        ViewMode::Grid => {
            for chunk in view.rows.chunks(GRID_COLUMNS) {
                let line: String = chunk
                    .iter()
                    .map(|row| {
                        let cell = format!("{:>8} {}", row.id, row.name);
                        format!("{cell:<width$}", width = GRID_CELL_WIDTH)
                    })
                    .collect();
                let _ = writeln!(out, "{}", line.trim_end());
            }
        }
    }

    let prev = if view.prev_enabled { "<prev" } else { "     " };
    let next = if view.next_enabled { "next>" } else { "     " };
    let _ = writeln!(
        out,
        "{prev}  page {} ({} per page)  {next}",
        view.page_index + 1,
        view.page_size
    );
    out
}

pub fn render_detail(detail: &CharacterDetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {} {} ==",
        detail.name,
        favorite_marker(detail.is_favorite)
    );
    let _ = writeln!(out, "Image: {}", detail.image_url);
    let _ = writeln!(out, "Series: {}", detail.series_count);
    for (label, names) in [
        ("Comics", &detail.comics),
        ("Events", &detail.events),
        ("Stories", &detail.stories),
    ] {
        let _ = writeln!(out, "{label}:");
        for name in names {
            let _ = writeln!(out, "  {name}");
        }
    }
    out
}
