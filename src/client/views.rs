//! Text renderings of entity state: a list table and a detail card.

use super::{entity::ApiEntity, reducer::EntityState};
use crate::modules::{authors::models::Author, books::models::Book};

/// How an entity is presented in list and detail views.
pub trait EntityView: ApiEntity {
    /// Plural heading, e.g. `Books`.
    const TITLE: &'static str;
    /// Singular heading, e.g. `Book`.
    const LABEL: &'static str;

    /// Column headings after `ID`.
    fn columns() -> &'static [&'static str];

    /// Cells matching [`EntityView::columns`].
    fn cells(&self) -> Vec<String>;

    /// Labelled fields for the detail view.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

impl EntityView for Author {
    const TITLE: &'static str = "Authors";
    const LABEL: &'static str = "Author";

    fn columns() -> &'static [&'static str] {
        &["Name", "Birth Date"]
    }

    fn cells(&self) -> Vec<String> {
        vec![text(&self.name), date(&self.birth_date)]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let books = self
            .books
            .iter()
            .map(|book| text(&book.title))
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            ("Name", text(&self.name)),
            ("Birth Date", date(&self.birth_date)),
            ("Books", books),
        ]
    }
}

impl EntityView for Book {
    const TITLE: &'static str = "Books";
    const LABEL: &'static str = "Book";

    fn columns() -> &'static [&'static str] {
        &["Title", "Description", "Publication Date", "Price", "Author"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            text(&self.title),
            text(&self.description),
            date(&self.publication_date),
            self.price.map(|p| p.to_string()).unwrap_or_default(),
            self.author
                .as_ref()
                .map(|author| text(&author.name))
                .unwrap_or_default(),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let cells = self.cells();
        Self::columns().iter().copied().zip(cells).collect()
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn date(value: &Option<time::Date>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}

/// Table of `state.entities`, or `No {TITLE} found` once loading is done.
pub fn render_list<E: EntityView>(state: &EntityState<E>) -> String {
    let mut lines = vec![E::TITLE.to_string()];

    if state.entities.is_empty() {
        if !state.loading {
            lines.push(format!("No {} found", E::TITLE));
        }
        return join_lines(lines);
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(state.entities.len() + 1);
    rows.push(
        std::iter::once("ID")
            .chain(E::columns().iter().copied())
            .map(str::to_string)
            .collect(),
    );
    for entity in &state.entities {
        let id = entity.id().map(|id| id.to_string()).unwrap_or_default();
        rows.push(std::iter::once(id).chain(entity.cells()).collect());
    }

    let mut widths = vec![0; rows[0].len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<w$}", cell, w = *width))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    join_lines(lines)
}

/// `{LABEL} [{id}]` followed by one `label: value` line per field.
pub fn render_detail<E: EntityView>(state: &EntityState<E>) -> String {
    let entity = &state.entity;
    let id = entity.id().map(|id| id.to_string()).unwrap_or_default();

    let heading = format!("{} [{}]", E::LABEL, id);
    let fields = entity
        .fields()
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"));
    join_lines(std::iter::once(heading).chain(fields).collect())
}

/// Newline-terminated lines.
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}
