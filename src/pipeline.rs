//! Compilation pipeline: catalog → per-cluster rendering → atlas and phrase tables.
//!
//! Catalog building is sequential because ordinals follow encounter order.
//! Rendering each unique cluster is independent, so the catalog is split into
//! contiguous chunks rendered on scoped worker threads and stitched back
//! together in ordinal order before the atlas is built.

use std::thread;

use par_glyph_config::{Config, LayoutMode};
use par_glyph_fonts::{GlyphRasterizer, Shaper};

use crate::atlas::Atlas;
use crate::bitmap::GlyphBitmap;
use crate::catalog::{Catalog, PhraseIndexList, build_catalog};
use crate::compositor::{ComposeStats, CompositorParams, compose_cluster};
use crate::error::{CompileError, Result};
use crate::normalizer::{Layout, NormalizeParams, normalize};
use crate::packer;
use crate::phrase_table::PhraseTable;

/// Everything the per-cluster stages need, resolved from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineOptions {
    pub compositor: CompositorParams,
    pub normalize: NormalizeParams,
    /// Worker threads for rendering; 0 = available parallelism
    pub workers: usize,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        let layout = match config.layout {
            LayoutMode::Variable => Layout::Variable,
            LayoutMode::Fixed => Layout::Fixed(config.effective_fixed_width()),
        };
        Self {
            compositor: CompositorParams {
                canvas_height: config.canvas_height,
                baseline: config.baseline,
                glyph_height: config.glyph_height,
            },
            normalize: NormalizeParams {
                glyph_height: config.glyph_height,
                threshold: config.threshold,
                placeholder_width: config.placeholder_width(),
                spacing: config.spacing_margin(),
                layout,
            },
            workers: config.workers,
        }
    }

    /// Threads to use for `jobs` clusters, never more than there are clusters.
    pub fn worker_count(&self, jobs: usize) -> usize {
        let wanted = if self.workers == 0 {
            thread::available_parallelism().map_or(1, |n| n.get())
        } else {
            self.workers
        };
        wanted.min(jobs).max(1)
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// One cluster after compositing, normalization and packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCluster {
    pub glyph: GlyphBitmap,
    /// No ink survived binarization
    pub blank: bool,
    pub stats: ComposeStats,
}

/// Counters for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileReport {
    pub clusters: usize,
    pub phrases: usize,
    pub atlas_bytes: usize,
    pub blank_clusters: usize,
    pub skipped_glyphs: usize,
    pub fallback_canvases: usize,
}

/// The full output of a run.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub catalog: Catalog,
    pub phrase_lists: Vec<PhraseIndexList>,
    pub atlas: Atlas,
    pub phrase_table: PhraseTable,
    pub report: CompileReport,
}

/// Drives the pipeline against a shaping and a rasterizing backend.
pub struct Compiler<'a> {
    shaper: &'a dyn Shaper,
    rasterizer: &'a dyn GlyphRasterizer,
    options: PipelineOptions,
}

impl<'a> Compiler<'a> {
    pub fn new(
        shaper: &'a dyn Shaper,
        rasterizer: &'a dyn GlyphRasterizer,
        options: PipelineOptions,
    ) -> Self {
        Self {
            shaper,
            rasterizer,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Composite, normalize and pack a single cluster.
    pub fn render_cluster(&self, ordinal: usize, text: &str) -> Result<RenderedCluster> {
        let canvas = compose_cluster(
            text,
            self.shaper,
            self.rasterizer,
            &self.options.compositor,
        );
        let normalized = normalize(&canvas, &self.options.normalize);
        if normalized.blank {
            log::debug!(
                "Cluster {} {:?} has no ink, using width {}",
                ordinal,
                text,
                normalized.unpadded_width
            );
        }

        let width = normalized.image.width();
        let bytes = packer::pack(&normalized.image)
            .ok_or(CompileError::InvalidGlyphWidth { ordinal, width })?;

        Ok(RenderedCluster {
            glyph: GlyphBitmap {
                height: normalized.image.height(),
                width,
                unpadded_width: normalized.unpadded_width,
                bytes,
            },
            blank: normalized.blank,
            stats: canvas.stats,
        })
    }

    fn render_chunk(&self, base: usize, clusters: &[String]) -> Result<Vec<RenderedCluster>> {
        clusters
            .iter()
            .enumerate()
            .map(|(i, text)| self.render_cluster(base + i, text))
            .collect()
    }

    /// Render every catalog entry, returned in ordinal order.
    pub fn render_catalog(&self, catalog: &Catalog) -> Result<Vec<RenderedCluster>> {
        let clusters = catalog.clusters();
        let workers = self.options.worker_count(clusters.len());
        if workers <= 1 {
            return self.render_chunk(0, clusters);
        }

        let chunk_size = clusters.len().div_ceil(workers);
        log::debug!(
            "Rendering {} clusters on {} threads ({} per chunk)",
            clusters.len(),
            workers,
            chunk_size
        );

        enum Pending<'s> {
            Spawned(thread::ScopedJoinHandle<'s, Result<Vec<RenderedCluster>>>),
            Done(Result<Vec<RenderedCluster>>),
        }

        let chunks: Vec<Result<Vec<RenderedCluster>>> = thread::scope(|scope| {
            let mut pending = Vec::with_capacity(workers);
            for (index, chunk) in clusters.chunks(chunk_size).enumerate() {
                let base = index * chunk_size;
                let spawned = thread::Builder::new()
                    .name(format!("glyph-raster-{}", index))
                    .spawn_scoped(scope, move || self.render_chunk(base, chunk));
                match spawned {
                    Ok(handle) => pending.push(Pending::Spawned(handle)),
                    Err(e) => {
                        log::warn!(
                            "Failed to spawn render thread {}: {}, rendering inline",
                            index,
                            e
                        );
                        pending.push(Pending::Done(self.render_chunk(base, chunk)));
                    }
                }
            }

            pending
                .into_iter()
                .map(|p| match p {
                    Pending::Spawned(handle) => handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
                    Pending::Done(result) => result,
                })
                .collect()
        });

        let mut rendered = Vec::with_capacity(clusters.len());
        for chunk in chunks {
            rendered.extend(chunk?);
        }
        Ok(rendered)
    }

    /// Compile a list of phrases into catalog, atlas and phrase table.
    pub fn compile<S: AsRef<str>>(&self, phrases: &[S]) -> Result<Compilation> {
        let (catalog, phrase_lists) = build_catalog(phrases);
        let rendered = self.render_catalog(&catalog)?;

        let mut report = CompileReport {
            clusters: catalog.len(),
            phrases: phrase_lists.len(),
            ..Default::default()
        };
        for cluster in &rendered {
            report.blank_clusters += usize::from(cluster.blank);
            report.skipped_glyphs += cluster.stats.skipped();
            report.fallback_canvases += usize::from(cluster.stats.fallback_canvas);
        }

        let glyphs: Vec<GlyphBitmap> = rendered.into_iter().map(|r| r.glyph).collect();
        let atlas = Atlas::build(self.options.normalize.glyph_height, &glyphs)?;
        let phrase_table = PhraseTable::build(&phrase_lists);
        report.atlas_bytes = atlas.total_bytes();

        log::info!(
            "Compiled {} phrases into {} unique clusters ({} atlas bytes, {} blank, {} glyphs skipped)",
            report.phrases,
            report.clusters,
            report.atlas_bytes,
            report.blank_clusters,
            report.skipped_glyphs
        );
        if report.fallback_canvases > 0 {
            log::warn!(
                "{} clusters had no usable first-glyph advance and used the fallback canvas",
                report.fallback_canvases
            );
        }

        Ok(Compilation {
            catalog,
            phrase_lists,
            atlas,
            phrase_table,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_config() {
        let config = Config::default().with_glyph_height(16);
        let options = PipelineOptions::from_config(&config);
        assert_eq!(options.normalize.glyph_height, 16);
        assert_eq!(options.normalize.placeholder_width, 4);
        assert_eq!(options.normalize.spacing, 0);
        assert_eq!(options.normalize.layout, Layout::Variable);
        assert_eq!(options.compositor.canvas_height, 100);
        assert_eq!(options.compositor.baseline, 80);
    }

    #[test]
    fn test_fixed_layout_defaults_to_height() {
        let config = Config::default()
            .with_glyph_height(20)
            .with_layout(LayoutMode::Fixed);
        let options = PipelineOptions::from_config(&config);
        assert_eq!(options.normalize.layout, Layout::Fixed(20));
    }

    #[test]
    fn test_worker_count_bounds() {
        let mut options = PipelineOptions::default();
        options.workers = 8;
        assert_eq!(options.worker_count(3), 3);
        assert_eq!(options.worker_count(0), 1);
        options.workers = 0;
        assert!(options.worker_count(100) >= 1);
    }
}
