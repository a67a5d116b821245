// src/controllers/draw_controller.rs
/// DrawController runs a whole document through one sink
/// Resolves group colors, picks the traversal order and hands each path to
/// the PathInterpreter, issuing refreshes as it goes
use std::fmt;

use crate::config::{Config, RefreshUnit, TraversalMode};
use crate::draw::{BezierTessellator, CoordinateTransform, PathInterpreter, PathStats};
use crate::error::{ConfigError, PathDataError, SinkError};
use crate::models::{Color, Document, Node};
use crate::render::{DrawSink, PenMode};
use crate::services::resolve;
use crate::services::svg::parse_path_data;
use crate::utilities::interleave;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub groups: usize,
    pub paths_drawn: usize,
    /// Paths dropped for structural errors in their data.
    pub paths_skipped: usize,
    /// Unrecognized elements and commands passed over.
    pub elements_ignored: usize,
    pub tokens_skipped: usize,
    pub strokes: usize,
    pub curves: usize,
}

impl RunSummary {
    fn add_path(&mut self, stats: PathStats) {
        self.paths_drawn += 1;
        self.strokes += stats.strokes;
        self.curves += stats.curves;
        self.tokens_skipped += stats.skipped_tokens;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} groups, {} paths drawn ({} strokes, {} curves), {} paths skipped, {} elements ignored",
            self.groups,
            self.paths_drawn,
            self.strokes,
            self.curves,
            self.paths_skipped,
            self.elements_ignored
        )
    }
}

pub struct DrawController<'a> {
    config: &'a Config,
    transform: CoordinateTransform,
    tessellator: BezierTessellator,
}

impl<'a> DrawController<'a> {
    /// Fails before anything is drawn if the document's viewport or the
    /// configured tessellation cannot be used.
    pub fn new(config: &'a Config, document: &Document) -> Result<Self, ConfigError> {
        let transform =
            CoordinateTransform::new(&document.viewport, &config.canvas(), config.drawing.clip)?;
        let tessellator = BezierTessellator::new(&config.tessellation)?;
        Ok(Self {
            config,
            transform,
            tessellator,
        })
    }

    pub fn run<S: DrawSink>(&self, document: &Document, sink: &mut S) -> Result<RunSummary, SinkError> {
        let mut summary = RunSummary::default();
        let mut refresher = Refresher::new(self.config.refresh.rate);

        sink.set_speed(self.config.drawing.speed)?;
        if self.config.drawing.draw_boundary {
            self.draw_boundary(sink)?;
        }

        let mut groups: Vec<(&Node, Color)> = Vec::new();
        for node in &document.nodes {
            match resolve(node) {
                Some(color) => groups.push((node, color)),
                None => {
                    log::warn!("Skipping top-level <{}>, only groups are drawn", node.tag());
                    summary.elements_ignored += 1;
                }
            }
        }
        summary.groups = groups.len();
        log::info!(
            "Drawing {} groups ({:?} traversal)",
            groups.len(),
            self.config.traversal.mode
        );

        match self.config.traversal.mode {
            TraversalMode::Sequential => {
                let per_path = self.config.refresh.unit == RefreshUnit::Path;
                for (group, color) in &groups {
                    sink.set_color(color)?;
                    for child in group.children() {
                        self.draw_node(child, sink, &mut summary)?;
                        if per_path {
                            refresher.tick(sink)?;
                        }
                    }
                    if !per_path {
                        refresher.tick(sink)?;
                    }
                }
            }
            TraversalMode::Interleaved => {
                let lengths: Vec<usize> = groups.iter().map(|(g, _)| g.children().len()).collect();
                for (g, i) in interleave(&lengths, self.config.traversal.alignment) {
                    let (group, color) = &groups[g];
                    let child = &group.children()[i];
                    if matches!(child, Node::Path(_)) {
                        sink.set_color(color)?;
                    }
                    self.draw_node(child, sink, &mut summary)?;
                    refresher.tick(sink)?;
                }
            }
        }

        sink.hide()?;
        sink.finish()?;
        log::info!("Drawing complete: {}", summary);
        Ok(summary)
    }

    fn draw_node<S: DrawSink>(
        &self,
        node: &Node,
        sink: &mut S,
        summary: &mut RunSummary,
    ) -> Result<(), SinkError> {
        let path = match node {
            Node::Path(path) => path,
            other => {
                log::warn!("Unrecognized element ({})", other.tag());
                summary.elements_ignored += 1;
                return Ok(());
            }
        };

        let tokens = match path
            .d
            .as_deref()
            .ok_or(PathDataError::MissingData)
            .and_then(parse_path_data)
        {
            Ok(tokens) => tokens,
            Err(e) => {
                log::warn!("Skipping path: {}", e);
                summary.paths_skipped += 1;
                return Ok(());
            }
        };

        let fill = self.config.drawing.fill_shapes;
        if fill {
            sink.begin_fill()?;
        }
        let stats = PathInterpreter::run(&self.transform, &self.tessellator, &tokens, sink)?;
        if fill {
            sink.end_fill()?;
        }
        log::debug!(
            "Path with {} tokens: {} strokes, {} curves",
            tokens.len(),
            stats.strokes,
            stats.curves
        );
        summary.add_path(stats);
        Ok(())
    }

    // outline of the drawable area, corner to corner and back
    fn draw_boundary<S: DrawSink>(&self, sink: &mut S) -> Result<(), SinkError> {
        let corners = self.transform.boundary();
        sink.set_position(corners[0], PenMode::Jump)?;
        let mut from = corners[0];
        for &to in corners[1..].iter().chain(std::iter::once(&corners[0])) {
            sink.stroke_to(from, to)?;
            from = to;
        }
        Ok(())
    }
}

/// Issues a refresh every `rate` processed units. A rate of zero leaves
/// publishing to the final `finish`.
struct Refresher {
    rate: usize,
    processed: usize,
}

impl Refresher {
    fn new(rate: usize) -> Self {
        Self { rate, processed: 0 }
    }

    fn tick<S: DrawSink>(&mut self, sink: &mut S) -> Result<(), SinkError> {
        self.processed += 1;
        if self.rate > 0 && self.processed % self.rate == 0 {
            sink.refresh()?;
        }
        Ok(())
    }
}
