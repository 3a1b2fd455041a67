// ui.rs - Controls and grid painting for the viewer

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};
use crate::GameOfLife;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() && !self.is_running {
                    self.update_generation();
                }

                if ui.button("⟲ Reload").clicked() {
                    self.reload();
                }

                ui.separator();

                ui.label(format!("Tick: {}", self.simulation().tick()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            if let Some(error) = &self.last_error {
                ui.colored_label(Color32::RED, error.as_str());
            }

            ui.separator();

            let spacing = 0.5;
            let box_size = self.cell_size;
            let grid = self.simulation().grid();
            let (height, width) = (grid.height(), grid.width());

            let total_size = Vec2::new(
                (box_size + spacing) * width as f32 - spacing,
                (box_size + spacing) * height as f32 - spacing,
            );

            egui::ScrollArea::both().show(ui, |ui| {
                let (response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());
                let start_pos = response.rect.min;

                painter.rect_filled(
                    Rect::from_min_size(start_pos, total_size),
                    0.0,
                    Color32::BLACK,
                );

                for row in 0..height {
                    for col in 0..width {
                        let x = start_pos.x + col as f32 * (box_size + spacing);
                        let y = start_pos.y + row as f32 * (box_size + spacing);
                        let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                        let cell_color = if grid.is_alive(row, col) {
                            self.live_color
                        } else {
                            self.dead_color
                        };
                        painter.rect_filled(rect, 1.0, cell_color);

                        // Border cells never change; outline them brighter.
                        let outline = if grid.is_border(row, col) { 120 } else { 60 };
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(outline)));
                    }
                }
            });

            ui.separator();

            let live_cells = self.simulation().population();
            let total = (height * width).max(1);
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {live_cells}"));
                ui.label(format!("Dead cells: {}", height * width - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });

        if self.is_running {
            ctx.request_repaint();
        }
    }
}
