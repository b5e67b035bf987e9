//! Drives the marker session from a recorded event script and applies what it asks for
//! to the project store.

use crate::config::Config;
use anyhow::{Context, Result};
use labeler_core::{
    CanvasLayout, CanvasParams, Direction, MarkerRequest, MarkerSession, MarkerState, Modifiers,
    Platform, PointerButtons, PointerEvent, RawModifiers, ResolutionRange, Tool, ZoomAction,
};
use labeler_project::{EditorStore, Project};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptTool {
    Cursor,
    Scissors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptZoom {
    In,
    Out,
}

/// One recorded input event. Pointer positions are relative to the visible canvas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Move {
        x: f64,
        y: f64,
        /// Whether the primary button is held during the move.
        #[serde(default)]
        pressed: bool,
    },
    Press {
        x: f64,
        y: f64,
    },
    Release {
        x: f64,
        y: f64,
    },
    Scroll {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    Modifiers {
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        meta: bool,
    },
    Tool {
        tool: ScriptTool,
    },
    Zoom {
        action: ScriptZoom,
    },
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
    let file = File::open(path).with_context(|| format!("opening script {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing script {}", path.display()))
}

/// What happened during a replay, beyond the edits already applied to the project.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub events: usize,
    pub edits: usize,
    pub submissions: usize,
    pub cuts: usize,
    pub rejected_cuts: usize,
    /// Entries whose rename was requested; renaming needs a name from the user.
    pub renames: Vec<usize>,
    /// Requested playback sections as `(start_frame, end_frame)`.
    pub playback: Vec<(f64, f64)>,
    pub resolution: u32,
    pub screen_start: f64,
    pub current_index: usize,
}

/// The host side of the editor: owns the store and rebuilds the marker state from it
/// before every event.
pub struct Editor {
    store: EditorStore,
    session: MarkerSession,
    config: Config,
    range: ResolutionRange,
    resolution: u32,
    platform: Platform,
    /// Canvas pixel at the left edge of the screen.
    screen_start: f64,
    /// Set when the current entry or zoom changed and the screen must follow it.
    needs_fit: bool,
    report: ReplayReport,
}

impl Editor {
    pub fn new(project: Project, config: Config, resolution: Option<u32>, platform: Platform) -> Self {
        let range = config.resolution_range();
        let resolution = resolution.map_or(config.default_resolution(), |r| range.clamp(r));
        Self {
            store: EditorStore::new(project, config.multiple_edit),
            session: MarkerSession::new(range),
            config,
            range,
            resolution,
            platform,
            screen_start: 0.0,
            needs_fit: true,
            report: ReplayReport::default(),
        }
    }

    pub fn marker_state(&self) -> Result<MarkerState> {
        let project = self.store.project();
        let window = self.store.entries_for_editing();
        let first = window.first().context("no entries to edit")?;
        let sample = project
            .sample_of(&first.entry)
            .with_context(|| format!("unknown sample '{}'", first.entry.sample))?;

        let canvas = CanvasParams::new(
            sample.frames,
            sample.sample_rate,
            self.resolution,
            self.config.density,
        );
        let layout = CanvasLayout {
            height: self.config.canvas_height,
            waveforms_height_ratio: self.config.waveforms_height_ratio,
            screen_start: self.screen_start,
        };
        Ok(MarkerState::from_window(
            &project.entries,
            window,
            project.label_config.clone(),
            canvas,
            layout,
        ))
    }

    pub fn run(&mut self, events: &[ScriptEvent]) -> Result<()> {
        for event in events {
            self.step(event)?;
        }
        Ok(())
    }

    /// Scrolls the screen to the current entry.
    fn fit_screen(&mut self) -> Result<()> {
        let current = self.store.project().current_index;
        let state = self.marker_state()?;
        self.screen_start = state.fit_screen_start(current, self.config.screen_width);
        self.needs_fit = false;
        log::debug!("Screen starts at {}px", self.screen_start);
        Ok(())
    }

    pub fn step(&mut self, event: &ScriptEvent) -> Result<()> {
        self.report.events += 1;
        if self.needs_fit {
            self.fit_screen()?;
        }
        let state = self.marker_state()?;
        let requests = match *event {
            ScriptEvent::Move { x, y, pressed } => {
                let buttons = if pressed {
                    PointerButtons::PRIMARY
                } else {
                    PointerButtons::NONE
                };
                self.session.handle(&state, PointerEvent::moved(x, y, buttons))
            }
            ScriptEvent::Press { x, y } => self.session.handle(&state, PointerEvent::pressed(x, y)),
            ScriptEvent::Release { x, y } => {
                self.session.handle(&state, PointerEvent::released(x, y))
            }
            ScriptEvent::Scroll { dx, dy } => {
                self.session.handle(&state, PointerEvent::scrolled(dx, dy))
            }
            ScriptEvent::Modifiers {
                ctrl,
                shift,
                alt,
                meta,
            } => {
                let raw = RawModifiers {
                    ctrl,
                    shift,
                    alt,
                    meta,
                };
                self.session.set_modifiers(Modifiers::normalize(raw, self.platform));
                Vec::new()
            }
            ScriptEvent::Tool { tool } => {
                self.session.set_tool(match tool {
                    ScriptTool::Cursor => Tool::Cursor,
                    ScriptTool::Scissors => Tool::Scissors,
                });
                Vec::new()
            }
            ScriptEvent::Zoom { action } => {
                let action = match action {
                    ScriptZoom::In => ZoomAction::In,
                    ScriptZoom::Out => ZoomAction::Out,
                };
                self.session.zoom(&state, action).into_iter().collect()
            }
        };
        for request in requests {
            self.apply(request);
        }
        Ok(())
    }

    fn apply(&mut self, request: MarkerRequest) {
        match request {
            MarkerRequest::EditEntries(entries) => {
                self.report.edits += 1;
                self.store.edit_entries(entries);
            }
            MarkerRequest::SubmitEntries => {
                if self.store.submit_entries() {
                    self.report.submissions += 1;
                }
            }
            MarkerRequest::Cut { index, position } => match self.store.cut_entry(index, position) {
                Ok(()) => self.report.cuts += 1,
                Err(e) => {
                    log::warn!("Cut rejected: {e}");
                    self.report.rejected_cuts += 1;
                }
            },
            MarkerRequest::Rename(index) => {
                log::info!("Rename requested for entry {index}");
                self.report.renames.push(index);
            }
            MarkerRequest::PlaySection {
                start_frame,
                end_frame,
            } => {
                log::info!("Play frames {start_frame}..{end_frame}");
                self.report.playback.push((start_frame, end_frame));
            }
            MarkerRequest::SwitchEntry(direction) => {
                self.needs_fit |= match direction {
                    Direction::Next => self.store.next_entry(),
                    Direction::Previous => self.store.previous_entry(),
                };
            }
            MarkerRequest::SwitchSample(direction) => {
                self.needs_fit |= match direction {
                    Direction::Next => self.store.next_sample(),
                    Direction::Previous => self.store.previous_sample(),
                };
            }
            MarkerRequest::ChangeResolution(resolution) => {
                self.resolution = self.range.clamp(resolution);
                self.needs_fit = true;
                log::debug!("Resolution is now {}", self.resolution);
            }
        }
    }

    pub fn finish(mut self) -> Result<(Project, ReplayReport)> {
        if self.needs_fit {
            self.fit_screen()?;
        }
        let mut report = self.report;
        report.resolution = self.resolution;
        report.screen_start = self.screen_start;
        let project = self.store.into_project();
        report.current_index = project.current_index;
        Ok((project, report))
    }
}
