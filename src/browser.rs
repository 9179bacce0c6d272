use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::aggregator::{shares, top_n};
use crate::error::Result;
use crate::fmt::{bar, pct, units};
use crate::models::{SaleRecord, Summary};
use crate::navigation::{Dashboard, Level, View};
use crate::tui::{self, InteractiveView, ViewAction, BAR_STYLE, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const BAR_WIDTH: usize = 24;

/// One table row, already ranked by units.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseRow {
    pub key: String,
    pub name: String,
    pub units: i64,
    pub share: f64,
}

fn ranked_rows<S: Summary + Clone>(summaries: &[S]) -> Vec<BrowseRow> {
    let ranked = top_n(summaries, summaries.len(), |s| s.units());
    ranked
        .iter()
        .zip(shares(&ranked))
        .map(|(s, share)| BrowseRow {
            key: s.key().to_string(),
            name: if s.name().is_empty() {
                s.key().to_string()
            } else {
                s.name().to_string()
            },
            units: s.units(),
            share,
        })
        .collect()
}

pub fn level_rows(level: &Level) -> Vec<BrowseRow> {
    match level {
        Level::Models(v) => ranked_rows(v),
        Level::Dealers(v) => ranked_rows(v),
        Level::Salespeople(v) => ranked_rows(v),
    }
}

fn model_name<'a>(records: &'a [SaleRecord], model_id: &'a str) -> &'a str {
    records
        .iter()
        .find(|r| r.model_id == model_id && !r.model_name.is_empty())
        .map_or(model_id, |r| r.model_name.as_str())
}

fn dealer_name<'a>(records: &'a [SaleRecord], dealer_id: &'a str) -> &'a str {
    records
        .iter()
        .find(|r| r.dealer_id == dealer_id && !r.dealer_name.is_empty())
        .map_or(dealer_id, |r| r.dealer_name.as_str())
}

/// "Models › Camry › Central Motors"
pub fn breadcrumb(records: &[SaleRecord], view: &View) -> String {
    match view {
        View::Models => "Models".to_string(),
        View::Dealers { model_id } => format!("Models \u{203a} {}", model_name(records, model_id)),
        View::Salespeople {
            model_id,
            dealer_id,
        } => format!(
            "Models \u{203a} {} \u{203a} {}",
            model_name(records, model_id),
            dealer_name(records, dealer_id)
        ),
    }
}

type Reload = Box<dyn FnMut() -> Result<Vec<SaleRecord>>>;

pub struct DrillBrowser {
    dashboard: Dashboard,
    reload: Option<Reload>,
    rows: Vec<BrowseRow>,
    /// Row to reselect when returning to a parent level.
    parent_cursor: Vec<usize>,
    status_message: Option<String>,
    table_state: TableState,
}

impl DrillBrowser {
    pub fn new(dashboard: Dashboard) -> Self {
        let rows = level_rows(&dashboard.level());
        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(0));
        }
        Self {
            dashboard,
            reload: None,
            rows,
            parent_cursor: Vec::new(),
            status_message: None,
            table_state,
        }
    }

    /// Enable `r` to fetch a fresh batch. The view returns to the model level.
    pub fn with_reload(mut self, reload: impl FnMut() -> Result<Vec<SaleRecord>> + 'static) -> Self {
        self.reload = Some(Box::new(reload));
        self
    }

    #[cfg(test)]
    pub fn view(&self) -> &View {
        self.dashboard.view()
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[BrowseRow] {
        &self.rows
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn refresh(&mut self, cursor: usize) {
        self.rows = level_rows(&self.dashboard.level());
        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(cursor.min(self.rows.len() - 1)));
        }
    }

    fn drill_in(&mut self) {
        let Some(idx) = self.table_state.selected() else {
            return;
        };
        let Some(row) = self.rows.get(idx) else {
            return;
        };
        let key = row.key.clone();
        let moved = match self.dashboard.view() {
            View::Models => self.dashboard.select_model(&key),
            View::Dealers { .. } => self.dashboard.select_dealer(&key),
            View::Salespeople { .. } => {
                self.status_message = Some("Already at salesperson level".to_string());
                return;
            }
        };
        match moved {
            Ok(()) => {
                self.parent_cursor.push(idx);
                self.refresh(0);
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    fn drill_out(&mut self) {
        if *self.dashboard.view() == View::Models {
            return;
        }
        self.dashboard.back();
        let cursor = self.parent_cursor.pop().unwrap_or(0);
        self.refresh(cursor);
    }

    fn reload(&mut self) {
        let Some(reload) = self.reload.as_mut() else {
            return;
        };
        match reload() {
            Ok(records) => {
                let count = records.len();
                self.dashboard.replace_records(records);
                self.parent_cursor.clear();
                self.refresh(0);
                self.status_message = Some(format!("Reloaded {count} records"));
            }
            Err(e) => self.status_message = Some(format!("Reload failed: {e}")),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let last = self.rows.len() as isize - 1;
        self.table_state.select(Some((current + delta).clamp(0, last) as usize));
    }
}

impl InteractiveView for DrillBrowser {
    fn draw(&mut self, frame: &mut Frame) {
        let areas = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Fill(1),   // table
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(frame.area());

        let title = breadcrumb(self.dashboard.records(), self.dashboard.view());
        frame.render_widget(Paragraph::new(title).style(HEADER_STYLE), areas[0]);

        let rows: Vec<Row> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Row::new(vec![
                    Cell::from(format!("{}", i + 1)),
                    Cell::from(r.name.clone()),
                    Cell::from(tui::units_span(r.units)),
                    Cell::from(pct(r.share)),
                    Cell::from(Line::styled(bar(r.share, BAR_WIDTH), BAR_STYLE)),
                ])
            })
            .collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(BAR_WIDTH as u16),
        ];
        let table = Table::new(rows, widths)
            .header(
                Row::new(vec!["#", "Name", "Units", "Share", ""])
                    .style(HEADER_STYLE)
                    .bottom_margin(1),
            )
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);
        frame.render_stateful_widget(table, areas[1], &mut self.table_state);

        let total: i64 = self.rows.iter().fold(0i64, |acc, r| acc.saturating_add(r.units));
        let mut status = format!(
            "{} {} | Total units: {}",
            self.rows.len(),
            self.dashboard.view().label(),
            units(total)
        );
        if let Some(ref msg) = self.status_message {
            status.push_str(" | ");
            status.push_str(msg);
        }
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), areas[2]);

        frame.render_widget(
            Paragraph::new("\u{2191}/\u{2193}:select  Enter/\u{2192}:drill in  Backspace/\u{2190}:back  r:reload  q:quit")
                .style(FOOTER_STYLE),
            areas[3],
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        self.status_message = None;
        match code {
            KeyCode::Char('q') => return ViewAction::Close,
            KeyCode::Esc => {
                if *self.dashboard.view() == View::Models {
                    return ViewAction::Close;
                }
                self.drill_out();
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::Home => self.move_cursor(isize::MIN / 2),
            KeyCode::End => self.move_cursor(isize::MAX / 2),
            KeyCode::Enter | KeyCode::Right => self.drill_in(),
            KeyCode::Backspace | KeyCode::Left => self.drill_out(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
        ViewAction::Continue
    }
}
