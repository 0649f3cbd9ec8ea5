//! Integration tests for figure composition.
//!
//! Every test runs against the headless recording backend, so no display is
//! required.

use plot_lattice::render::{OperationSet, PresentationLog};
use plot_lattice::{
    AcceptAll, AddressingMode, Command, Figure, FigureConfig, FigureError, Index, RecordingBackend,
    RenderError, Surface,
};

fn lenient() -> Figure {
    Figure::new().strict(false)
}

fn region_ops(surface: &plot_lattice::RecordingSurface, row: usize, col: usize) -> Vec<String> {
    surface
        .region(row, col)
        .unwrap()
        .operations()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Extent Inference
// =============================================================================

#[test]
fn extent_matches_largest_indices() {
    let mut fig = lenient();
    fig.at((0, 0)).unwrap().record(Command::new("plot"));
    fig.at((3, 1)).unwrap().record(Command::new("plot"));
    fig.at((1, 4)).unwrap();

    assert_eq!((fig.extent().rows(), fig.extent().cols()), (4, 5));

    let surface = fig.materialize().unwrap();
    assert_eq!(Surface::dimensions(&surface), (4, 5));
}

#[test]
fn bare_column_index_implies_one_row() {
    let mut fig = lenient();
    fig.at(2usize).unwrap().record(Command::new("bar").arg(vec![1, 2]));

    assert_eq!(fig.extent().to_string(), "1x3");
    let surface = fig.materialize().unwrap();
    assert_eq!(region_ops(&surface, 0, 2), vec!["bar"]);
    assert!(region_ops(&surface, 0, 0).is_empty());
}

#[test]
fn slices_do_not_grow_the_extent() {
    let mut fig = lenient();
    fig.at((1, 1)).unwrap().record(Command::new("plot"));
    fig.at((.., ..)).unwrap().record(Command::new("grid").arg(true));

    assert_eq!(fig.extent().to_string(), "2x2");
}

// =============================================================================
// Replay
// =============================================================================

#[test]
fn explicit_command_lands_on_its_region_only() {
    let mut fig = lenient();
    fig.at((1, 2))
        .unwrap()
        .record(Command::new("plot").arg(vec![1, 2, 3]).kwarg("color", "red"));

    let surface = fig.materialize().unwrap();
    for row in 0..2 {
        for col in 0..3 {
            let expected: Vec<String> = if (row, col) == (1, 2) {
                vec!["plot".into()]
            } else {
                Vec::new()
            };
            assert_eq!(region_ops(&surface, row, col), expected, "region ({row}, {col})");
        }
    }
    assert_eq!(
        surface.region(1, 2).unwrap().calls()[0],
        Command::new("plot").arg(vec![1, 2, 3]).kwarg("color", "red")
    );
}

#[test]
fn same_coordinate_twice_replays_both_in_order() {
    let mut fig = lenient();
    fig.at((0, 0)).unwrap().record(Command::new("plot"));
    fig.at((0, 0)).unwrap().record(Command::new("set_title").arg("both"));

    assert_eq!(fig.explicit_cells().len(), 2);
    let surface = fig.materialize().unwrap();
    assert_eq!(region_ops(&surface, 0, 0), vec!["plot", "set_title"]);
}

#[test]
fn last_record_on_a_cell_wins() {
    let mut fig = lenient();
    let cell = fig.at((0, 0)).unwrap();
    cell.record(Command::new("plot"));
    cell.record(Command::new("scatter"));

    let surface = fig.materialize().unwrap();
    assert_eq!(region_ops(&surface, 0, 0), vec!["scatter"]);
}

#[test]
fn unrecorded_cells_are_skipped() {
    let mut fig = lenient();
    fig.at((0, 1)).unwrap();
    fig.at((.., 0)).unwrap();
    fig.at((0, 0)).unwrap().record(Command::new("plot"));

    let surface = fig.materialize().unwrap();
    assert_eq!(region_ops(&surface, 0, 0), vec!["plot"]);
    assert!(region_ops(&surface, 0, 1).is_empty());
}

#[test]
fn range_commands_cover_the_cross_product_after_explicit_ones() {
    let mut fig = lenient();
    fig.at((.., 1)).unwrap().record(Command::new("grid").arg(true));
    fig.at((0, 0)).unwrap().record(Command::new("plot"));
    fig.at((1, 1)).unwrap().record(Command::new("scatter"));
    fig.at((1, ..)).unwrap().record(Command::new("set_xlabel").arg("x"));

    let surface = fig.materialize().unwrap();
    assert_eq!(region_ops(&surface, 0, 0), vec!["plot"]);
    assert_eq!(region_ops(&surface, 0, 1), vec!["grid"]);
    assert_eq!(region_ops(&surface, 1, 0), vec!["set_xlabel"]);
    assert_eq!(region_ops(&surface, 1, 1), vec!["scatter", "grid", "set_xlabel"]);
}

#[test]
fn bounded_range_is_clipped_to_the_extent() {
    let mut fig = lenient();
    fig.at((0, 2)).unwrap().record(Command::new("plot"));
    fig.at((0, 1..10)).unwrap().record(Command::new("axhline").arg(0.0));

    let surface = fig.materialize().unwrap();
    assert!(region_ops(&surface, 0, 0).is_empty());
    assert_eq!(region_ops(&surface, 0, 1), vec!["axhline"]);
    assert_eq!(region_ops(&surface, 0, 2), vec!["plot", "axhline"]);
}

// =============================================================================
// Addressing Modes
// =============================================================================

#[test]
fn single_cell_records_once() {
    let mut fig = Figure::new();
    assert_eq!(fig.mode(), AddressingMode::Unset);

    fig.record(Command::new("plot").arg(vec![1, 2, 3])).unwrap();
    assert_eq!(fig.mode(), AddressingMode::SingleCell);

    let err = fig.record(Command::new("plot")).unwrap_err();
    assert!(matches!(err, FigureError::ModeConflict { .. }));
    assert!(err.to_string().contains("fig.at((0, 1))"));

    let surface = fig.materialize().unwrap();
    assert_eq!(Surface::dimensions(&surface), (1, 1));
    assert_eq!(region_ops(&surface, 0, 0), vec!["plot"]);
}

#[test]
fn indexed_access_after_single_cell_conflicts() {
    let mut fig = Figure::new();
    fig.record(Command::new("plot")).unwrap();

    assert!(matches!(
        fig.at((0, 0)),
        Err(FigureError::ModeConflict {
            mode: AddressingMode::SingleCell,
            ..
        })
    ));
}

#[test]
fn direct_record_after_indexing_conflicts() {
    let mut fig = lenient();
    fig.at((.., 0)).unwrap();
    assert_eq!(fig.mode(), AddressingMode::Range);

    let err = fig.record(Command::new("plot")).unwrap_err();
    assert!(err.to_string().starts_with("grid mode is selected"));

    fig.at((0, 0)).unwrap();
    assert_eq!(fig.mode(), AddressingMode::ExplicitGrid);
    assert!(fig.enter_single_cell().is_err());
}

#[test]
fn malformed_keys_are_rejected() {
    let mut fig = lenient();
    assert!(matches!(
        fig.at(vec![Index::At(0)]),
        Err(FigureError::MalformedKey { components: 1 })
    ));
    assert!(matches!(
        fig.at(&[Index::At(0), Index::All, Index::At(1)][..]),
        Err(FigureError::MalformedKey { components: 3 })
    ));
    assert_eq!(fig.mode(), AddressingMode::Unset);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn largest_index_is_rejected_without_side_effects() {
    let mut fig = lenient();
    assert!(matches!(
        fig.at((usize::MAX, 0)),
        Err(FigureError::IndexOverflow { index: usize::MAX })
    ));
    assert!(matches!(
        fig.at(usize::MAX),
        Err(FigureError::IndexOverflow { .. })
    ));
    assert_eq!(fig.mode(), AddressingMode::Unset);
    assert!(fig.extent().is_empty());
    assert!(fig.explicit_cells().is_empty());
    assert!(fig.range_cells().is_empty());

    fig.at((1, 1)).unwrap().record(Command::new("plot"));
    assert!(fig.at((0, usize::MAX)).is_err());
    assert_eq!(fig.extent().to_string(), "2x2");
    assert_eq!(fig.explicit_cells().len(), 1);
}


#[test]
fn empty_grid_fails_before_allocating() {
    let mut fig = Figure::new();
    assert!(matches!(fig.materialize(), Err(FigureError::EmptyGrid)));

    fig.at((.., ..)).unwrap().record(Command::new("grid"));
    assert!(matches!(fig.show(), Err(FigureError::EmptyGrid)));
    assert_eq!(fig.backend().surfaces_created(), 0);
}

#[test]
fn row_without_columns_is_rejected_by_the_backend() {
    let mut fig = Figure::new();
    fig.at((2, ..)).unwrap().record(Command::new("plot"));

    assert!(matches!(
        fig.materialize(),
        Err(FigureError::Render(RenderError::InvalidDimensions { rows: 3, cols: 0 }))
    ));
}

#[test]
fn unknown_operation_passes_through() {
    let mut fig = lenient();
    fig.at((0, 0)).unwrap().record(Command::new("plott").arg(vec![1]));

    let err = fig.materialize().unwrap_err();
    assert!(matches!(
        err,
        FigureError::Render(RenderError::UnknownOperation { ref operation }) if operation == "plott"
    ));
}

#[test]
fn permissive_backend_accepts_any_operation() {
    let mut fig = Figure::with_backend(RecordingBackend::permissive()).strict(false);
    fig.at((0, 0)).unwrap().record(Command::new("set_facecolor").arg("black"));
    assert!(fig.materialize().is_ok());

    let only = OperationSet::Only(["twinx".to_string()].into_iter().collect());
    let mut fig = Figure::with_backend(RecordingBackend::with_operations(only)).strict(false);
    fig.at((0, 0)).unwrap().record(Command::new("plot"));
    assert!(fig.materialize().is_err());
}

#[test]
fn strict_validation_rejects_blank_regions() {
    let mut fig = Figure::new();
    fig.at((0, 0)).unwrap().record(Command::new("plot"));
    fig.at((0, 1)).unwrap();

    assert!(matches!(
        fig.materialize(),
        Err(FigureError::Render(RenderError::Validation(_)))
    ));

    fig.set_config(FigureConfig::default().with_strict(false));
    assert!(fig.materialize().is_ok());
}

#[test]
fn custom_validator_replaces_the_structural_one() {
    let mut fig = Figure::new().validator(AcceptAll);
    fig.at((0, 0)).unwrap().record(Command::new("plot"));
    fig.at((1, 1)).unwrap();
    assert!(fig.materialize().is_ok());
}

// =============================================================================
// Presentation
// =============================================================================

#[test]
fn show_twice_presents_identical_surfaces() {
    let backend = RecordingBackend::new();
    let log: PresentationLog = backend.presentations();

    let mut fig = Figure::with_backend(backend);
    fig.at((0, 0)).unwrap().record(Command::new("plot").arg(vec![1, 4, 9]));
    fig.at((0, 1)).unwrap().record(Command::new("hist").arg(vec![1.5, 2.5]));
    fig.at((.., ..)).unwrap().record(Command::new("grid").arg(true));

    fig.show().unwrap();
    fig.show().unwrap();

    let entries = log.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], entries[1]);
    assert!(entries[0].tight_layout);
    assert_eq!(entries[0].regions[0].calls.len(), 2);
    assert_eq!(fig.backend().surfaces_created(), 2);
}

#[test]
fn tight_layout_can_be_disabled() {
    let backend = RecordingBackend::new();
    let log = backend.presentations();

    let mut fig = Figure::with_backend(backend).tight_layout(false);
    fig.at((0, 0)).unwrap().record(Command::new("plot"));
    fig.show().unwrap();

    assert!(!log.last().unwrap().tight_layout);
}

#[test]
fn save_twice_writes_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let mut fig = lenient();
    fig.at((1, 0)).unwrap().record(Command::new("scatter").arg(vec![1, 2]).arg(vec![3, 4]));
    fig.at((0, ..)).unwrap().record(Command::new("set_title").arg("top"));

    fig.save(&first).unwrap();
    fig.save(&second).unwrap();

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert_eq!(a, b);

    let json: serde_json::Value = serde_json::from_slice(&a).unwrap();
    assert_eq!(json["rows"], 2);
    assert_eq!(json["cols"], 1);
    assert_eq!(json["regions"][1]["calls"][0]["operation"], "scatter");
}

#[test]
fn save_to_missing_directory_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut fig = Figure::new();
    fig.record(Command::new("plot")).unwrap();

    assert!(matches!(
        fig.save(dir.path().join("missing").join("figure.json")),
        Err(FigureError::Render(RenderError::Io(_)))
    ));
}

#[test]
fn figure_display_and_ids() {
    let a = Figure::new();
    let b = Figure::new();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.to_string(), format!("<figure: {}>", a.id()));
}

#[test]
fn config_file_drives_strictness() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.toml");
    std::fs::write(&path, "strict = false\ntight_layout = false\n").unwrap();

    let mut fig = Figure::with_config(FigureConfig::load(&path).unwrap());
    fig.at((0, 0)).unwrap().record(Command::new("plot"));
    fig.at((0, 1)).unwrap();

    assert!(!fig.config().strict);
    assert!(fig.materialize().is_ok());
}
