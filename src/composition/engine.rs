use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    command::{builder::log_warnings, CommandBuilder, RenderPlan},
    config::Config,
    error::{CompositorError, RenderWarning},
    layout::RenderRequest,
    process::{ProcessRunner, SystemRunner},
};

/// Where a render currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Init,
    OverlayRunning,
    EmbedRunning,
    Done,
    Failed,
}

/// Things that move a render between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEvent {
    Start,
    OverlaySucceeded { embed_pending: bool },
    EmbedSucceeded,
    StepFailed,
}

impl RenderState {
    /// Apply `event`. Events that make no sense in the current state leave
    /// it unchanged; `Done` and `Failed` are terminal.
    pub fn next(self, event: RenderEvent) -> Self {
        use RenderEvent::*;
        use RenderState::*;

        match (self, event) {
            (Init, Start) => OverlayRunning,
            (OverlayRunning, OverlaySucceeded { embed_pending: true }) => EmbedRunning,
            (OverlayRunning, OverlaySucceeded { embed_pending: false }) => Done,
            (EmbedRunning, EmbedSucceeded) => Done,
            (OverlayRunning | EmbedRunning, StepFailed) => Failed,
            (state, _) => state,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::OverlayRunning => "overlay running",
            Self::EmbedRunning => "embed running",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub state: RenderState,
    pub output: PathBuf,
    /// External commands that were launched
    pub steps_run: usize,
    pub warnings: Vec<RenderWarning>,
}

/// A render that stopped on a failed step
#[derive(Error, Debug)]
#[error("render {state} after {steps_run} step(s): {source}")]
pub struct RenderFailure {
    /// Always [`RenderState::Failed`]
    pub state: RenderState,
    /// External commands that were launched, the failing one included
    pub steps_run: usize,
    pub warnings: Vec<RenderWarning>,
    #[source]
    pub source: CompositorError,
}

/// Runs the overlay step and then, if there is one, the embed step
///
/// Both steps write the same output file, so they never overlap: the embed
/// step reads what the overlay step wrote.
pub struct CompositionEngine<R = SystemRunner> {
    config: Config,
    runner: R,
}

impl CompositionEngine<SystemRunner> {
    /// Create an engine that launches real processes
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, SystemRunner::new())
    }
}

impl<R: ProcessRunner> CompositionEngine<R> {
    pub fn with_runner(config: Config, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Build the commands for `request` without running anything
    pub fn plan(&self, request: &RenderRequest) -> RenderPlan {
        CommandBuilder::new(&self.config).plan(request)
    }

    /// Run the overlay step, then decide on and run the embed step.
    ///
    /// The embed image is looked up only after the overlay has succeeded,
    /// since it may be a file the overlay itself wrote.
    pub async fn render(&self, request: &RenderRequest) -> std::result::Result<RenderReport, RenderFailure> {
        info!("Compositing onto {:?}", request.background);

        let builder = CommandBuilder::new(&self.config);
        let RenderPlan {
            overlay,
            mut warnings,
            ..
        } = builder.plan_overlay(request);

        let mut state = self.advance(RenderState::Init, RenderEvent::Start);
        let mut steps_run = 0;

        info!("Step 1: text overlay -> {:?}", request.output);
        debug!("{}", overlay);
        steps_run += 1;
        if let Err(source) = self.runner.run(&overlay).await {
            state = self.advance(state, RenderEvent::StepFailed);
            error!("Text overlay failed: {}", source);
            return Err(RenderFailure {
                state,
                steps_run,
                warnings,
                source,
            });
        }

        let mut embed_warnings = Vec::new();
        let embed = builder.embed(request, &mut embed_warnings);
        log_warnings(&embed_warnings);
        warnings.extend(embed_warnings);

        state = self.advance(
            state,
            RenderEvent::OverlaySucceeded {
                embed_pending: embed.is_some(),
            },
        );

        if let Some(embed) = embed {
            info!("Step 2: thumbnail embed -> {:?}", request.output);
            debug!("{}", embed);
            steps_run += 1;
            if let Err(source) = self.runner.run(&embed).await {
                state = self.advance(state, RenderEvent::StepFailed);
                error!("Thumbnail embed failed: {}", source);
                return Err(RenderFailure {
                    state,
                    steps_run,
                    warnings,
                    source,
                });
            }
            state = self.advance(state, RenderEvent::EmbedSucceeded);
        }

        info!("Done! Output saved to: {:?}", request.output);

        Ok(RenderReport {
            state,
            output: request.output.clone(),
            steps_run,
            warnings,
        })
    }

    fn advance(&self, state: RenderState, event: RenderEvent) -> RenderState {
        let next = state.next(event);
        debug!("Render state: {} -> {}", state, next);
        next
    }
}
