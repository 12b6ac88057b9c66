use std::future::Future;

use futures::future::join_all;
use tracing::{Instrument, debug, info, info_span, instrument, warn};

use crate::analysis_pipeline::common::{AnalysisError, Result, RngFactory, StageTimings, Timer, Track};
use crate::analysis_pipeline::fallback::FallbackHeatmapGenerator;
use crate::analysis_pipeline::loader::{ImageInput, ImageLoader, StandardImageLoader};
use crate::analysis_pipeline::orchestrator::config::OrchestratorConfig;
use crate::analysis_pipeline::orchestrator::types::{AnalysisResult, ScoreOrigin};
use crate::analysis_pipeline::render::{HeatmapArtifact, HeatmapRenderer};
use crate::analysis_pipeline::saliency::{ContrastSaliencyEngine, SaliencyEngine};
use crate::analysis_pipeline::scoring::{ScoreSet, ScoringAdapter, synthesize_scores};

pub struct AnalysisOrchestrator<L: ImageLoader, E: SaliencyEngine, S: ScoringAdapter> {
    loader: L,
    engine: E,
    scorer: S,
    config: OrchestratorConfig,
    saliency_renderer: HeatmapRenderer,
    fallback: FallbackHeatmapGenerator,
    rng: RngFactory,
}

impl<S: ScoringAdapter> AnalysisOrchestrator<StandardImageLoader, ContrastSaliencyEngine, S> {
    pub fn new(config: OrchestratorConfig, scorer: S) -> Self {
        Self::with_custom(
            StandardImageLoader::new(),
            ContrastSaliencyEngine::default(),
            scorer,
            config,
        )
    }
}

impl<L: ImageLoader, E: SaliencyEngine, S: ScoringAdapter> AnalysisOrchestrator<L, E, S> {
    pub fn with_custom(loader: L, engine: E, scorer: S, config: OrchestratorConfig) -> Self {
        Self {
            loader,
            engine,
            scorer,
            saliency_renderer: config.saliency_renderer(),
            fallback: config.fallback_generator(),
            rng: config.rng_factory(),
            config,
        }
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Analyzes every image concurrently. Results come back in input order,
    /// one per input, whatever happened to the individual tracks.
    #[instrument(skip_all, fields(images = inputs.len()))]
    pub async fn analyze_batch(&self, inputs: &[ImageInput]) -> Vec<AnalysisResult> {
        if inputs.is_empty() {
            return Vec::new();
        }

        info!("Starting analysis of {} images", inputs.len());
        let results = join_all(
            inputs
                .iter()
                .enumerate()
                .map(|(index, input)| self.analyze_image(input, index)),
        )
        .await;

        let degraded = results.iter().filter(|r| r.is_degraded()).count();
        info!(
            "Analysis complete: {} images, {} degraded",
            results.len(),
            degraded
        );
        results
    }

    /// Like [`analyze_batch`](Self::analyze_batch), but gives up as soon as
    /// `cancel` resolves. In-flight loads and scoring requests are dropped.
    pub async fn analyze_batch_until<C>(&self, inputs: &[ImageInput], cancel: C) -> Result<Vec<AnalysisResult>>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            results = self.analyze_batch(inputs) => Ok(results),
            _ = cancel => {
                warn!("Batch of {} images cancelled", inputs.len());
                Err(AnalysisError::Cancelled)
            }
        }
    }

    /// Runs the heatmap and scoring tracks side by side and joins them.
    /// Never fails: each track degrades to its fallback on its own.
    pub async fn analyze_image(&self, input: &ImageInput, index: usize) -> AnalysisResult {
        let span = info_span!("analyze_image", image_id = %input.id);
        async move {
            let original_src = input.source.reference();
            let ((heatmap, mut timings), (scores, score_origin, score_timings)) = futures::join!(
                self.heatmap_track(input, index, &original_src),
                self.scoring_track(input, index)
            );
            timings.merge(score_timings);
            timings.log_summary(&input.id);

            debug!(
                heatmap = ?heatmap.origin(),
                scores = ?score_origin,
                "Tracks joined"
            );
            AnalysisResult::new(input.id.clone(), original_src, heatmap, scores, score_origin)
        }
        .instrument(span)
        .await
    }

    async fn heatmap_track(
        &self,
        input: &ImageInput,
        index: usize,
        original_src: &str,
    ) -> (HeatmapArtifact, StageTimings) {
        let mut timings = StageTimings::new();

        let timer = Timer::start("decode");
        let loaded = self
            .bounded("decode", self.loader.load(&input.source), AnalysisError::Decode)
            .await;
        timings.record(timer);

        let pixels = match loaded {
            Ok(pixels) => pixels,
            Err(e) => {
                warn!(error = %e, "Image could not be loaded, reusing original as heatmap");
                return (HeatmapArtifact::original(original_src), timings);
            }
        };
        debug!("Decoded {}x{}", pixels.width(), pixels.height());

        let timer = Timer::start("saliency");
        let field = self.engine.compute(&pixels);
        timings.record(timer);

        let timer = Timer::start("render");
        let rendered = field.and_then(|field| self.saliency_renderer.render(&field, Some(&pixels)));
        timings.record(timer);

        let err = match rendered {
            Ok(artifact) => return (artifact, timings),
            Err(e) => e,
        };
        warn!(error = %err, "Saliency heatmap failed, using geometric fallback");

        let timer = Timer::start("fallback_heatmap");
        let mut rng = self.rng.for_image(index, Track::Heatmap);
        let fallback = self.fallback.generate(&pixels, &mut rng);
        timings.record(timer);

        match fallback {
            Ok(artifact) => (artifact, timings),
            Err(e) => {
                warn!(error = %e, "Fallback heatmap failed, reusing original as heatmap");
                (HeatmapArtifact::original(original_src), timings)
            }
        }
    }

    async fn scoring_track(&self, input: &ImageInput, index: usize) -> (ScoreSet, ScoreOrigin, StageTimings) {
        let mut timings = StageTimings::new();

        let timer = Timer::start("scoring");
        let scored = self
            .bounded("scoring", self.scorer.score(&input.source), AnalysisError::Scoring)
            .await;
        timings.record(timer);

        match scored {
            Ok(scores) => (scores, ScoreOrigin::Remote, timings),
            Err(e) => {
                warn!(error = %e, "Scoring failed, synthesizing scores");
                let mut rng = self.rng.for_image(index, Track::Scoring);
                (synthesize_scores(&mut rng), ScoreOrigin::Synthesized, timings)
            }
        }
    }

    /// Applies the configured track timeout, reporting expiry as the stage's
    /// own error kind so it takes the same fallback as any other failure.
    async fn bounded<T, F>(&self, stage: &str, work: F, on_timeout: fn(String) -> AnalysisError) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.config.track_timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| on_timeout(format!("{} timed out after {:?}", stage, limit)))?,
            None => work.await,
        }
    }
}
