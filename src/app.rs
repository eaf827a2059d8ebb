//! Application shell: panels, legend, projects, insights, and the modal
//! shown for incomplete wedges. All map logic lives in the workspace
//! crates; this file is egui layout plus file I/O.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;
use egui::{RichText, Sense, Vec2};

use aim_chart::config::PROJECTS_INITIAL_DISPLAY;
use aim_chart::{
    pillar_base_color, BreadcrumbTarget, HeatmapMode, IncompleteClick, NavigationController,
    StateChange, SunburstWidget, ZoomLevel,
};
use aim_core::model::{BeliefTree, Project};
use aim_core::progress::{overall_completeness, projects_for_pillar, top_projects_across_pillars};
use aim_core::text::sanitize_filename;
use aim_core::export_rows;

use crate::share::{share_url, VIEWER_BASE_URL};

pub struct ViewerApp {
    nav: NavigationController,
    chart: SunburstWidget,
    /// Filled by the chart's incomplete-click callback, drained per frame
    pending_incomplete: Rc<RefCell<Option<IncompleteClick>>>,
    modal: Option<IncompleteClick>,
    /// Cleared by a navigation subscriber whenever the view changes
    showing_alternatives: Rc<Cell<bool>>,
    status: Option<String>,
    gist_id: Option<String>,
}

impl ViewerApp {
    pub fn new(tree: Option<BeliefTree>, heatmap: HeatmapMode, gist_id: Option<String>) -> Self {
        let mut nav = NavigationController::new();

        let showing_alternatives = Rc::new(Cell::new(false));
        let reset = Rc::clone(&showing_alternatives);
        nav.subscribe(move |change| {
            if matches!(
                change,
                StateChange::Navigated { .. } | StateChange::TreeReplaced | StateChange::Reset
            ) {
                reset.set(false);
            }
        });

        if let Some(tree) = tree {
            nav.set_tree(Arc::new(tree));
        }
        nav.set_heatmap(heatmap);

        let pending_incomplete: Rc<RefCell<Option<IncompleteClick>>> =
            Rc::new(RefCell::new(None));
        let mut chart = SunburstWidget::new();
        let sink = Rc::clone(&pending_incomplete);
        chart.set_incomplete_handler(move |info| *sink.borrow_mut() = Some(info));

        Self {
            nav,
            chart,
            pending_incomplete,
            modal: None,
            showing_alternatives,
            status: None,
            gist_id,
        }
    }

    // =========================================================================
    // TITLE BAR
    // =========================================================================

    fn title_bar(&mut self, ui: &mut egui::Ui, tree: Option<&BeliefTree>) {
        ui.horizontal(|ui| {
            let title = tree
                .map(|t| t.title.as_str())
                .filter(|t| !t.is_empty())
                .unwrap_or("AIM");
            ui.heading(title);
            ui.separator();

            let crumbs = self.nav.breadcrumb();
            let mut go: Option<BreadcrumbTarget> = None;
            for (i, crumb) in crumbs.iter().enumerate() {
                if i > 0 {
                    ui.label(RichText::new("\u{203a}").weak());
                }
                match crumb.target {
                    Some(target) => {
                        if ui.link(&crumb.label).clicked() {
                            go = Some(target);
                        }
                    }
                    None => {
                        ui.label(RichText::new(&crumb.label).strong());
                    }
                }
            }
            match go {
                Some(BreadcrumbTarget::FullView) => self.nav.navigate_to_full_view(),
                Some(BreadcrumbTarget::Pillar(p)) => self.nav.navigate_to_pillar(p),
                None => {}
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut mode = self.nav.heatmap();
                egui::ComboBox::from_label("Heatmap")
                    .selected_text(mode.label())
                    .show_ui(ui, |ui| {
                        for candidate in HeatmapMode::ALL {
                            ui.selectable_value(&mut mode, candidate, candidate.label());
                        }
                    });
                if mode != self.nav.heatmap() {
                    self.nav.set_heatmap(mode);
                }

                if let Some(tree) = tree {
                    if ui.button("Download CSV").clicked() {
                        self.status = Some(match export_csv(tree) {
                            Ok(path) => format!("Saved {}", path.display()),
                            Err(e) => format!("Export failed: {e:#}"),
                        });
                    }
                }
                if let Some(gist) = &self.gist_id {
                    ui.hyperlink_to("Share", share_url(VIEWER_BASE_URL, gist));
                }
                if let Some(status) = &self.status {
                    ui.label(RichText::new(status).weak().small());
                }
            });
        });

        let heatmap = self.nav.heatmap();
        if heatmap != HeatmapMode::Off {
            ui.label(RichText::new(heatmap.description()).weak().small());
        }
    }

    // =========================================================================
    // SIDEBAR
    // =========================================================================

    fn sidebar(&mut self, ui: &mut egui::Ui, tree: Option<&BeliefTree>) {
        let Some(tree) = tree else {
            ui.label("Load a CSV file to see your map.");
            return;
        };

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.legend(ui, tree);
            ui.separator();
            self.projects_section(ui, tree);
            ui.separator();
            self.insights_section(ui, tree);
        });
    }

    fn legend(&mut self, ui: &mut egui::Ui, tree: &BeliefTree) {
        ui.heading("Pillars");
        let completeness = overall_completeness(tree);
        let selected = self.nav.selected_pillar();
        let mut navigate: Option<u8> = None;

        for p in 1..=3u8 {
            let name = tree.pillar_display_name(p);
            let tally = completeness.pillar(p).copied();
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                ui.painter()
                    .circle_filled(rect.center(), 5.0, pillar_base_color(p));

                let label = if selected == Some(p) {
                    RichText::new(&name).strong()
                } else {
                    RichText::new(&name)
                };
                if ui.link(label).clicked() {
                    navigate = Some(p);
                }
                if let Some(tally) = tally {
                    if !tally.is_complete() {
                        ui.label(
                            RichText::new(format!("{}/{}", tally.filled, tally.total))
                                .weak()
                                .small(),
                        );
                    }
                }
            });
        }

        if let Some(p) = navigate {
            self.nav.navigate_to_pillar(p);
        }
    }

    fn projects_section(&mut self, ui: &mut egui::Ui, tree: &BeliefTree) {
        // Focus views show that pillar's projects; the full view shows the
        // best suggestion per pillar
        let pillar_filter = match self.nav.level() {
            ZoomLevel::Full => None,
            _ => self.nav.selected_pillar(),
        };
        let projects: Vec<&Project> = match pillar_filter {
            Some(p) => projects_for_pillar(tree, Some(p)),
            None => top_projects_across_pillars(tree),
        };

        ui.horizontal(|ui| {
            ui.heading("Projects");
            ui.label(RichText::new(projects.len().to_string()).weak());
        });

        if projects.is_empty() {
            ui.label(
                RichText::new(
                    "Complete more of your map to unlock personalized project recommendations.",
                )
                .weak()
                .italics(),
            );
            return;
        }

        let expanded = self.showing_alternatives.get();
        let visible = if expanded {
            &projects[..]
        } else {
            &projects[..projects.len().min(PROJECTS_INITIAL_DISPLAY)]
        };

        for project in visible {
            self.project_card(ui, tree, project);
        }

        if !expanded && projects.len() > PROJECTS_INITIAL_DISPLAY {
            if ui.button("Not quite right? Show alternatives").clicked() {
                self.showing_alternatives.set(true);
            }
        }
    }

    fn project_card(&self, ui: &mut egui::Ui, tree: &BeliefTree, project: &Project) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                let name = if project.name.is_empty() {
                    "Untitled project"
                } else {
                    &project.name
                };
                ui.label(RichText::new(name).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(kind) = project.kind {
                        ui.label(RichText::new(kind.label()).weak().small());
                    }
                });
            });
            if !project.rationale.is_empty() {
                ui.label(&project.rationale);
            }
            if let Some(p) = project.pillar {
                ui.label(RichText::new(tree.pillar_display_name(p)).weak().small());
            }
        });
    }

    fn insights_section(&self, ui: &mut egui::Ui, tree: &BeliefTree) {
        ui.heading("Insights");
        let pillar_context = match self.nav.level() {
            ZoomLevel::Full => None,
            _ => self.nav.selected_pillar(),
        };
        let insights = tree.insights.resolve(pillar_context);

        if insights.overview.is_empty() {
            ui.label(
                RichText::new("Complete more of your map to unlock personalized insights.")
                    .weak()
                    .italics(),
            );
        } else {
            ui.label(&insights.overview);
        }
        if !insights.observations.is_empty() {
            ui.label(RichText::new("Observations").strong().small());
            ui.label(&insights.observations);
        }
        if !insights.projects.is_empty() {
            ui.label(RichText::new("Suggested focus").strong().small());
            ui.label(&insights.projects);
        }
    }

    // =========================================================================
    // INCOMPLETE MODAL
    // =========================================================================

    fn incomplete_modal(&mut self, ctx: &egui::Context) {
        let Some(info) = self.modal.clone() else {
            return;
        };
        let mut open = true;
        let mut dismissed = false;

        egui::Window::new(format!("{} is still taking shape", info.pillar_name))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(
                    "This part of the map has no belief text yet. Filling it in unlocks \
                     tailored project recommendations and a more complete picture.",
                );
                if let Some(gist) = &self.gist_id {
                    ui.hyperlink_to(
                        "Continue in the hosted viewer",
                        share_url(VIEWER_BASE_URL, gist),
                    );
                }
                if ui.button("Dismiss").clicked() {
                    dismissed = true;
                }
            });

        if !open || dismissed {
            self.modal = None;
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(info) = self.pending_incomplete.borrow_mut().take() {
            self.modal = Some(info);
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.modal.is_some() {
                self.modal = None;
            } else {
                self.nav.navigate_up();
            }
        }

        let tree = self.nav.tree().cloned();

        egui::TopBottomPanel::top("title_bar")
            .show(ctx, |ui| self.title_bar(ui, tree.as_deref()));
        egui::SidePanel::right("sidebar")
            .default_width(340.0)
            .show(ctx, |ui| self.sidebar(ui, tree.as_deref()));
        egui::CentralPanel::default().show(ctx, |ui| {
            let Self { nav, chart, .. } = self;
            chart.ui(ui, nav);
        });

        self.incomplete_modal(ctx);
    }
}

/// Write the current map next to the working directory as CSV
fn export_csv(tree: &BeliefTree) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(format!("{}.csv", sanitize_filename(&tree.title, 50)));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in export_rows(tree) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}
