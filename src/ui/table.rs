use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::table::DISPLAY_COLUMNS;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Summary table (central panel, top)
// ---------------------------------------------------------------------------

/// Render the visible summary rows through the display schema.
pub fn summary_table(ui: &mut Ui, state: &AppState, max_height: f32) {
    let rows: Vec<_> = state.visible_rows().collect();

    egui::ScrollArea::horizontal()
        .id_salt("summary_table_hscroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(48.0), DISPLAY_COLUMNS.len())
                .max_scroll_height(max_height)
                .header(ROW_HEIGHT + 4.0, |mut header| {
                    for (_, label) in DISPLAY_COLUMNS {
                        header.col(|ui: &mut Ui| {
                            ui.strong(label);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut table_row| {
                        let row = rows[table_row.index()];
                        for (field, _) in DISPLAY_COLUMNS {
                            let text = field.cell(row);
                            table_row.col(|ui: &mut Ui| {
                                if field.is_numeric() {
                                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                        ui.label(text);
                                    });
                                } else {
                                    ui.label(text);
                                }
                            });
                        }
                    });
                });
        });

    if rows.is_empty() {
        ui.label("No rows match the current selection.");
    }
}
