//! Single-hierarchy conversion: load models, page their LODs, write it all.

use std::path::{Path, PathBuf};

use lodpage_io::TileStore;
use lodpage_scene::{NameNodes, Node, PagedLodInspector, PagedLodSummary, accept, accept_mut};

use crate::error::BuildError;
use crate::partition::{ConvertReport, RangePartitioner};
use crate::writeout::{SubgraphWriter, TileFailure, WriteReport};

/// Everything a model conversion produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertOutcome {
    /// The root file written.
    pub output: PathBuf,
    /// Models that failed to load and were left out.
    pub unreadable: Vec<TileFailure>,
    pub conversion: ConvertReport,
    pub paged_nodes: Vec<PagedLodSummary>,
    pub subgraphs: WriteReport,
}

/// Load `models`, convert their LODs to paged LODs and write the result.
///
/// Several models are grouped under one root. The root is written to
/// `output`; paged children are written next to it with names derived from
/// `output`'s file name.
pub fn convert_models<S: TileStore + ?Sized>(
    store: &S,
    models: &[PathBuf],
    output: &Path,
    make_all_children_paged: bool,
) -> Result<ConvertOutcome, BuildError> {
    let mut outcome = ConvertOutcome {
        output: output.to_path_buf(),
        ..Default::default()
    };

    let mut loaded = Vec::with_capacity(models.len());
    for model in models {
        match store.read_node(model) {
            Ok(node) => loaded.push(node),
            Err(e) => {
                tracing::warn!(path = %model.display(), error = %e, "failed to load model");
                outcome.unreadable.push(TileFailure {
                    path: model.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let mut root = match loaded.len() {
        0 => return Err(BuildError::NoModelLoaded),
        1 => loaded.remove(0),
        _ => Node::group(loaded),
    };

    outcome.conversion =
        RangePartitioner::for_output(output, make_all_children_paged).convert(&mut root);

    accept_mut(&mut NameNodes::new(), &mut root);

    let mut inspector = PagedLodInspector::new();
    accept(&mut inspector, &root);
    outcome.paged_nodes = inspector.summaries;

    store.write_node(&root, output)?;
    tracing::info!(path = %output.display(), "wrote root");

    let dir = output.parent().unwrap_or(Path::new(""));
    outcome.subgraphs = SubgraphWriter::new(dir, store).write(&root);

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lodpage_io::FsTileStore;
    use lodpage_scene::{Lod, LodRange, NodeData, NodeKind};

    fn scene_with_lod() -> Node {
        let leaf = |x: f32| Node::mesh(vec![Vec3::new(x, 0.0, 0.0), Vec3::ONE], vec![]);
        let lod = Node::new(NodeData::Lod(Lod {
            ranges: vec![
                LodRange {
                    min: 0.0,
                    max: 50.0,
                    child: leaf(0.0),
                },
                LodRange {
                    min: 50.0,
                    max: 200.0,
                    child: leaf(1.0),
                },
                LodRange {
                    min: 200.0,
                    max: 1000.0,
                    child: leaf(2.0),
                },
            ],
        }));
        Node::group(vec![lod])
    }

    #[test]
    fn test_convert_writes_root_and_children() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsTileStore::new();
        let model = dir.path().join("scene.ron");
        store.write_node(&scene_with_lod(), &model).unwrap();

        let output = dir.path().join("output.ive");
        let outcome = convert_models(&store, &[model], &output, false).unwrap();

        assert_eq!(outcome.conversion.converted, 1);
        assert_eq!(outcome.subgraphs.written.len(), 2);
        assert!(dir.path().join("output_0_1.ive").is_file());
        assert!(dir.path().join("output_0_2.ive").is_file());

        let root = store.read_node(&output).unwrap();
        assert_eq!(root.name, "Group_0");
        let child = root.children()[0];
        assert_eq!(child.kind(), NodeKind::PagedLod);
        // Only the inline range is loaded after reading back.
        assert_eq!(child.children().len(), 1);

        assert_eq!(outcome.paged_nodes.len(), 1);
        assert_eq!(outcome.paged_nodes[0].files.len(), 2);
    }

    #[test]
    fn test_no_model_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsTileStore::new();
        let err = convert_models(
            &store,
            &[dir.path().join("absent.ron")],
            &dir.path().join("o.ive"),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::NoModelLoaded));

        let err = convert_models(&store, &[], &dir.path().join("o.ive"), false).unwrap_err();
        assert!(matches!(err, BuildError::NoModelLoaded));
    }

    #[test]
    fn test_several_models_are_grouped() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsTileStore::new();
        let a = dir.path().join("a.ron");
        let b = dir.path().join("b.ron");
        store.write_node(&scene_with_lod(), &a).unwrap();
        store.write_node(&scene_with_lod(), &b).unwrap();

        let output = dir.path().join("o.ive");
        let outcome = convert_models(&store, &[a, b], &output, false).unwrap();
        assert_eq!(outcome.conversion.converted, 2);
        assert_eq!(outcome.subgraphs.written.len(), 4);
        let root = store.read_node(&output).unwrap();
        assert_eq!(root.children().len(), 2);
    }
}
