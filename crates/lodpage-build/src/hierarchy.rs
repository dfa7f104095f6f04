//! Multi-level paging tree built from a directory per resolution level.
//!
//! Levels are processed finest first. Each tile of a level becomes a paged
//! node holding its own geometry inline, plus an external range for every
//! tile of the previous (finer) level that it mostly contains. Tiles switch
//! to their children inside `own radius * dilation_factor`. The coarsest
//! level is finally attached to a single root tile.
//!
//! Only [`TileOutputRecord`]s cross a level boundary; the finer level's nodes
//! are dropped once written.

use std::path::{Path, PathBuf};

use lodpage_config::Settings;
use lodpage_io::{TileStore, list_tiles, name_less_extension, relative_path};
use lodpage_scene::{Node, NodeData, PagedLod, PagedRange, Sphere, UNBOUNDED};

use crate::containment::Containment;
use crate::error::BuildError;
use crate::level_config::LevelConfig;
use crate::writeout::TileFailure;

/// Stem of the top tile in single-directory mode.
const SINGLE_DIR_TOP_STEM: &str = "l1";
/// Stem of the detail tile in single-directory mode.
const SINGLE_DIR_DETAIL_STEM: &str = "test";
/// Stem of the written detail tile in single-directory mode.
const SINGLE_DIR_LEVEL2_STEM: &str = "level2";

/// What a coarser level needs to know about a written finer tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileOutputRecord {
    /// Where the tile was written.
    pub path: PathBuf,
    /// Bound of the tile's own geometry.
    pub sphere: Sphere,
}

/// Output paths and bounding spheres accumulated while building one level.
///
/// Kept as two parallel lists; [`LevelOutputs::records`] refuses to pair
/// them up if their lengths disagree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelOutputs {
    paths: Vec<PathBuf>,
    spheres: Vec<Sphere>,
}

impl LevelOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already accumulated lists.
    pub fn from_parts(paths: Vec<PathBuf>, spheres: Vec<Sphere>) -> Self {
        Self { paths, spheres }
    }

    pub fn push(&mut self, record: TileOutputRecord) {
        self.paths.push(record.path);
        self.spheres.push(record.sphere);
    }

    /// Number of written tiles.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Pair paths with spheres.
    ///
    /// Fails with [`BuildError::LevelCountMismatch`] if the lists are out of
    /// sync.
    pub fn records(&self) -> Result<Vec<TileOutputRecord>, BuildError> {
        if self.paths.len() != self.spheres.len() {
            return Err(BuildError::LevelCountMismatch {
                paths: self.paths.len(),
                spheres: self.spheres.len(),
            });
        }
        Ok(self
            .paths
            .iter()
            .zip(&self.spheres)
            .map(|(path, sphere)| TileOutputRecord {
                path: path.clone(),
                sphere: *sphere,
            })
            .collect())
    }
}

/// Per-level statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSummary {
    pub ordinal: usize,
    pub dir: PathBuf,
    /// Source tiles found in the directory.
    pub tiles: usize,
    /// Tiles written and available to the next level.
    pub written: usize,
}

/// What a build produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildReport {
    /// The root tile.
    pub root: PathBuf,
    /// Levels in processing order.
    pub levels: Vec<LevelSummary>,
    /// Every tile written, root last.
    pub written: Vec<PathBuf>,
    /// Tiles that could not be read or written.
    pub failed: Vec<TileFailure>,
}

/// Wrap source geometry as a paged node that is always visible.
pub fn wrap_tile(geometry: Node) -> PagedLod {
    let mut plod = PagedLod::new();
    if let Some(bound) = geometry.bound() {
        plod.set_bound(bound);
    }
    plod.ranges.push(PagedRange::inline(geometry, 0.0, UNBOUNDED));
    plod
}

/// Builds the paging tree level by level.
pub struct HierarchicalPagingBuilder<'a, S: TileStore + ?Sized> {
    store: &'a S,
    settings: &'a Settings,
    containment: Containment,
    out_dir: PathBuf,
}

impl<'a, S: TileStore + ?Sized> HierarchicalPagingBuilder<'a, S> {
    pub fn new(store: &'a S, settings: &'a Settings, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            settings,
            containment: Containment::new(settings.paging.containment_slack),
            out_dir: out_dir.into(),
        }
    }

    /// Directory holding every per-level tile.
    pub fn level_dir(&self) -> PathBuf {
        self.out_dir.join(&self.settings.output.level_dir)
    }

    /// Path of the root tile.
    pub fn root_path(&self) -> PathBuf {
        self.out_dir.join(self.settings.output.root_file_name())
    }

    /// Output path of a level tile: `<level_dir>/<ordinal>_<stem><output_ext>`.
    pub fn tile_output_path(&self, ordinal: usize, source: &Path) -> PathBuf {
        self.level_dir().join(format!(
            "{}_{}{}",
            ordinal,
            name_less_extension(source),
            self.settings.output.output_ext
        ))
    }

    /// Run a full build from a level config.
    pub fn build(&self, config: &LevelConfig) -> Result<BuildReport, BuildError> {
        self.create_level_dir()?;

        let mut report = BuildReport::default();
        let mut previous = LevelOutputs::new();
        for (ordinal, dir) in config.processing_order() {
            previous = self.build_level(dir, ordinal, &previous, &mut report)?;
        }

        self.build_root(&config.top_level, &previous, &mut report)?;
        Ok(report)
    }

    /// Convert every source tile in `dir`, linking the contained tiles of
    /// `previous`. Returns this level's outputs.
    pub fn build_level(
        &self,
        dir: &Path,
        ordinal: usize,
        previous: &LevelOutputs,
        report: &mut BuildReport,
    ) -> Result<LevelOutputs, BuildError> {
        let children = previous.records()?;

        let sources = list_tiles(dir, &self.settings.input.source_ext).unwrap_or_else(|e| {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to scan level directory");
            Vec::new()
        });
        tracing::info!(
            ordinal,
            dir = %dir.display(),
            tiles = sources.len(),
            candidates = children.len(),
            "building level"
        );

        let level_dir = self.level_dir();
        let mut current = LevelOutputs::new();
        for source in &sources {
            let output = self.tile_output_path(ordinal, source);
            let Some((node, sphere)) = self.page_tile(source, &children, &level_dir, report)
            else {
                continue;
            };

            match self.store.write_node(&node, &output) {
                Ok(()) => {
                    report.written.push(output.clone());
                    current.push(TileOutputRecord {
                        path: output,
                        sphere,
                    });
                }
                Err(e) => {
                    tracing::warn!(path = %output.display(), error = %e, "tile write failed");
                    report.failed.push(TileFailure {
                        path: output,
                        error: e.to_string(),
                    });
                }
            }
        }

        report.levels.push(LevelSummary {
            ordinal,
            dir: dir.to_path_buf(),
            tiles: sources.len(),
            written: current.len(),
        });
        Ok(current)
    }

    /// Build and write the root tile over the coarsest level's outputs.
    pub fn build_root(
        &self,
        top_level: &Path,
        previous: &LevelOutputs,
        report: &mut BuildReport,
    ) -> Result<(), BuildError> {
        let children = previous.records()?;
        let geometry = self.store.read_node(top_level)?;
        let sphere = geometry.bound().unwrap_or(Sphere::INVALID);
        let split = sphere.radius * self.settings.paging.dilation_factor;

        let (plod, attached) = self.link_children(geometry, sphere, split, &children, &self.out_dir);
        tracing::info!(attached, candidates = children.len(), "building root tile");

        let root = self.root_path();
        let node = Node::new(NodeData::PagedLod(plod)).with_name(name_less_extension(top_level));
        self.store.write_node(&node, &root)?;
        tracing::info!(path = %root.display(), "wrote root tile");

        report.written.push(root.clone());
        report.root = root;
        Ok(())
    }

    /// Single-directory build.
    ///
    /// `<dir>/l1<output_ext>` is the top tile and `<dir>/test.<source_ext>`
    /// its only child. The child switches in at the top tile's undilated
    /// radius.
    pub fn build_single_dir(&self, dir: &Path) -> Result<BuildReport, BuildError> {
        if !dir.is_dir() {
            return Err(BuildError::InputDirMissing {
                path: dir.to_path_buf(),
            });
        }
        self.create_level_dir()?;

        let output_ext = &self.settings.output.output_ext;
        let top_path = dir.join(format!("{SINGLE_DIR_TOP_STEM}{output_ext}"));
        let detail_path = dir.join(format!(
            "{SINGLE_DIR_DETAIL_STEM}.{}",
            self.settings.input.source_ext
        ));
        let level2_path = self
            .level_dir()
            .join(format!("{SINGLE_DIR_LEVEL2_STEM}{output_ext}"));

        let mut report = BuildReport::default();
        let geometry = self.store.read_node(&top_path)?;

        let detail = self
            .store
            .read_node(&detail_path)
            .map(|node| Node::new(NodeData::PagedLod(wrap_tile(node))))
            .and_then(|node| self.store.write_node(&node, &level2_path));
        match detail {
            Ok(()) => report.written.push(level2_path.clone()),
            Err(e) => {
                tracing::warn!(path = %level2_path.display(), error = %e, "detail tile failed");
                report.failed.push(TileFailure {
                    path: level2_path.clone(),
                    error: e.to_string(),
                });
            }
        }

        let sphere = geometry.bound().unwrap_or(Sphere::INVALID);
        let radius = sphere.radius.max(0.0);
        let mut plod = PagedLod::new();
        plod.set_bound(sphere);
        plod.ranges
            .push(PagedRange::inline(geometry, radius, UNBOUNDED));
        plod.ranges.push(PagedRange::external(
            relative_path(&self.out_dir, &level2_path),
            0.0,
            radius,
        ));

        let root = self.root_path();
        self.store
            .write_node(&Node::new(NodeData::PagedLod(plod)), &root)?;
        report.written.push(root.clone());
        report.root = root;
        Ok(report)
    }

    fn create_level_dir(&self) -> Result<(), BuildError> {
        let dir = self.level_dir();
        std::fs::create_dir_all(&dir).map_err(|source| {
            tracing::error!(dir = %dir.display(), "failed to create level directory");
            BuildError::CreateOutputDir {
                path: dir.clone(),
                source,
            }
        })
    }

    /// Load one source tile and turn it into a paged node.
    ///
    /// Returns the node and its own geometry bound, or `None` (recorded as a
    /// failure) if the tile cannot be read or has no geometry.
    fn page_tile(
        &self,
        source: &Path,
        children: &[TileOutputRecord],
        referencing_dir: &Path,
        report: &mut BuildReport,
    ) -> Option<(Node, Sphere)> {
        let geometry = match self.store.read_node(source) {
            Ok(node) => node,
            Err(e) => {
                tracing::warn!(path = %source.display(), error = %e, "failed to read tile");
                report.failed.push(TileFailure {
                    path: source.to_path_buf(),
                    error: e.to_string(),
                });
                return None;
            }
        };
        let Some(sphere) = geometry.bound() else {
            tracing::warn!(path = %source.display(), "tile has no geometry");
            report.failed.push(TileFailure {
                path: source.to_path_buf(),
                error: "tile has no geometry".to_string(),
            });
            return None;
        };

        let split = sphere.radius * self.settings.paging.dilation_factor;
        let (plod, attached) = self.link_children(geometry, sphere, split, children, referencing_dir);
        tracing::debug!(path = %source.display(), attached, split, "paged tile");

        let node = Node::new(NodeData::PagedLod(plod)).with_name(name_less_extension(source));
        Some((node, sphere))
    }

    /// Attach every mostly contained child at `[0, split)` and set the
    /// geometry range to `[split, inf)`, or `[0, inf)` if nothing attached.
    fn link_children(
        &self,
        geometry: Node,
        sphere: Sphere,
        split: f64,
        children: &[TileOutputRecord],
        referencing_dir: &Path,
    ) -> (PagedLod, usize) {
        let mut plod = wrap_tile(geometry);
        plod.set_bound(sphere);

        for child in children {
            if self.containment.mostly_contains(&sphere, &child.sphere) {
                let file = relative_path(referencing_dir, &child.path);
                plod.ranges.push(PagedRange::external(file, 0.0, split));
            }
        }

        let attached = plod.ranges.len() - 1;
        if attached > 0 {
            plod.ranges[0].min = split;
        }
        (plod, attached)
    }
}
