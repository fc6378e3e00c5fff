//! Orchestrator: runs Captioner → Storyteller → Narrator in strict order.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::Instrument;

use crate::context::ServiceContext;
use crate::domain::{ImageReference, StoryOutcome};
use crate::error::StoryError;
use crate::stages::{Captioner, Narrator, PipelineSettings, Storyteller};

/// Sequences the three stages and stops at the first failure.
pub struct Orchestrator {
    captioner: Captioner,
    storyteller: Storyteller,
    narrator: Narrator,
}

impl Orchestrator {
    /// Build the stages from the context's ports.
    #[must_use]
    pub fn new(ctx: &ServiceContext, settings: &PipelineSettings) -> Self {
        Self {
            captioner: Captioner::new(Arc::clone(&ctx.captioner), settings),
            storyteller: Storyteller::new(Arc::clone(&ctx.text), settings),
            narrator: Narrator::new(Arc::clone(&ctx.speech), settings),
        }
    }

    /// Run the pipeline for one image, writing the narration to `audio_path`.
    ///
    /// Later stages are never invoked once an earlier one fails.
    ///
    /// # Errors
    ///
    /// Stage errors are returned unchanged; anything outside the stage
    /// taxonomy (e.g. a failed file write) becomes [`StoryError::Pipeline`].
    pub async fn run(
        &self,
        image: &ImageReference,
        audio_path: &Path,
    ) -> Result<StoryOutcome, StoryError> {
        let caption = self
            .captioner
            .describe(image)
            .instrument(tracing::info_span!("caption"))
            .await
            .map_err(at_stage("captioning"))?;

        let story = self
            .storyteller
            .tell(&caption)
            .instrument(tracing::info_span!("story"))
            .await
            .map_err(at_stage("storytelling"))?;

        self.narrator
            .narrate(&story, audio_path)
            .instrument(tracing::info_span!("narration"))
            .await
            .map_err(at_stage("narration"))?;

        Ok(StoryOutcome { caption, story, audio_path: audio_path.to_path_buf() })
    }

    /// Run the pipeline on its own task so that a panic in any stage is
    /// reported as [`StoryError::Pipeline`] instead of taking the process down.
    ///
    /// When `cancel` resolves first the task is aborted and awaited, so no
    /// stage runs (and no port is held) after this returns.
    ///
    /// # Errors
    ///
    /// Same as [`Orchestrator::run`], plus [`StoryError::Cancelled`] on
    /// cancellation and a pipeline error if the task panicked.
    pub async fn run_guarded(
        self: Arc<Self>,
        image: ImageReference,
        audio_path: PathBuf,
        cancel: impl Future<Output = ()>,
    ) -> Result<StoryOutcome, StoryError> {
        let mut task = tokio::spawn(async move { self.run(&image, &audio_path).await });
        let joined = tokio::select! {
            joined = &mut task => joined,
            () = cancel => {
                task.abort();
                match task.await {
                    // Finished before the abort landed; keep its result.
                    Ok(result) => return result,
                    Err(e) if e.is_cancelled() => {
                        tracing::info!("pipeline cancelled");
                        return Err(StoryError::Cancelled);
                    }
                    Err(e) => Err(e),
                }
            }
        };
        match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(StoryError::Cancelled),
            Err(e) => {
                tracing::error!(error = %e, "pipeline task panicked");
                Err(StoryError::Pipeline(
                    "an unexpected internal error stopped the pipeline".to_string(),
                ))
            }
        }
    }
}

/// Wrap errors outside the stage taxonomy with the name of the stage.
fn at_stage(stage: &'static str) -> impl Fn(StoryError) -> StoryError {
    move |e| {
        if e.is_stage_failure() {
            e
        } else {
            StoryError::Pipeline(format!("{stage} failed: {e}"))
        }
    }
}
