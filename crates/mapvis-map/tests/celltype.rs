use mapvis_map::{reconcile_celltypes, sort_groups};
use mapvis_model::{
    Bucket, ColorSource, ColumnRole, FontStyle, LabelMapping, MapvisError, ReconcileOptions,
    TextColor,
};

fn mapping(pairs: &[(&str, &str)]) -> LabelMapping {
    LabelMapping::from_pairs("test", pairs.iter().copied()).expect("valid mapping")
}

fn sample() -> (LabelMapping, LabelMapping) {
    (
        mapping(&[
            ("Tcell_1", "T-cell"),
            ("Bcell_A", "B-cell"),
            ("Macro_X", "Myeloid"),
        ]),
        mapping(&[
            ("T_cell_X", "T-cell"),
            ("B_cell_Y", "B-cell"),
            ("Mono_1", "Myeloid"),
            ("NK_1", "NK cell"),
        ]),
    )
}

#[test]
fn shared_and_single_source_buckets() {
    let (a, b) = sample();
    let result = reconcile_celltypes(&a, &b, &ReconcileOptions::default()).unwrap();

    assert_eq!(
        result.bucket_labels(Bucket::BothPresent),
        vec!["B-cell", "Myeloid", "T-cell"]
    );
    assert!(result.bucket_labels(Bucket::OnlyA).is_empty());
    assert_eq!(result.bucket_labels(Bucket::OnlyB), vec!["NK cell"]);
    assert_eq!(
        result.table.consensus_labels(),
        vec!["B-cell", "Myeloid", "T-cell", "NK cell"]
    );
}

#[test]
fn columns_follow_dataset_names() {
    let (a, b) = sample();
    let options = ReconcileOptions::default().with_dataset_names("DS1", "OtherDS");
    let result = reconcile_celltypes(&a, &b, &options).unwrap();

    assert_eq!(
        result.table.column_names(),
        vec!["DS1", "DS1 consensus", "OtherDS consensus", "OtherDS"]
    );
    let roles: Vec<ColumnRole> = result.table.columns.iter().map(|c| c.role).collect();
    assert_eq!(
        roles,
        vec![
            ColumnRole::Labels,
            ColumnRole::Consensus,
            ColumnRole::Consensus,
            ColumnRole::Labels
        ]
    );
    assert_eq!(result.table.caption, "Celltype Mapping Table");
    assert!(result.table.hide_index);
}

#[test]
fn several_originals_share_one_row() {
    let a = mapping(&[("T1a", "T"), ("T1b", "T"), ("B1", "B")]);
    let b = mapping(&[("T2", "T"), ("B2b", "B"), ("B2a", "B")]);
    let result = reconcile_celltypes(&a, &b, &ReconcileOptions::default()).unwrap();

    assert_eq!(result.table.rows.len(), 2);
    let b_row = &result.table.rows[0];
    assert_eq!(b_row.consensus, "B");
    assert_eq!(b_row.cells[0].values, vec!["B1"]);
    assert_eq!(b_row.cells[3].values, vec!["B2a", "B2b"]);
    assert_eq!(b_row.cells[3].text("<br/>"), "B2a<br/>B2b");
}

#[test]
fn single_source_rows_leave_other_side_blank() {
    let a = mapping(&[("a", "A"), ("b", "B")]);
    let b = mapping(&[("c", "C"), ("d", "D")]);
    let result = reconcile_celltypes(&a, &b, &ReconcileOptions::default()).unwrap();

    assert_eq!(result.table.consensus_labels(), vec!["A", "B", "C", "D"]);
    let a_row = &result.table.rows[0];
    assert_eq!(a_row.bucket, Some(Bucket::OnlyA));
    assert_eq!(a_row.cells[1].values, vec!["A"]);
    assert!(a_row.cells[2].is_blank());
    assert!(a_row.cells[3].is_blank());

    let d_row = &result.table.rows[3];
    assert_eq!(d_row.bucket, Some(Bucket::OnlyB));
    assert!(d_row.cells[0].is_blank());
    assert!(d_row.cells[1].is_blank());
    assert_eq!(d_row.cells[2].values, vec!["D"]);
}

#[test]
fn one_side_empty() {
    let (a, _) = sample();
    let result = reconcile_celltypes(&a, &LabelMapping::new(), &ReconcileOptions::default()).unwrap();
    assert_eq!(result.table.rows.len(), 3);
    assert!(result.groups.iter().all(|g| g.bucket == Bucket::OnlyA));
}

#[test]
fn both_empty_gives_empty_table_without_legend() {
    let result = reconcile_celltypes(
        &LabelMapping::new(),
        &LabelMapping::new(),
        &ReconcileOptions::default(),
    )
    .unwrap();
    assert!(result.table.is_empty());
    assert!(result.table.legend.is_none());
    assert!(result.colors.is_empty());
}

#[test]
fn overrides_take_precedence() {
    let (a, b) = sample();
    let options = ReconcileOptions::default()
        .with_color("T-cell", "#FF0000")
        .with_color("B-cell", "00ff00");
    let result = reconcile_celltypes(&a, &b, &options).unwrap();

    let t = result.colors.get("T-cell").unwrap();
    assert_eq!(t.color.to_hex(), "#ff0000");
    assert_eq!(t.source, ColorSource::Override);
    assert_eq!(result.colors.color("B-cell").unwrap().to_hex(), "#00ff00");
    assert_eq!(
        result.colors.get("NK cell").unwrap().source,
        ColorSource::Generated
    );
}

#[test]
fn padded_override_label_matches_trimmed_consensus() {
    let a = mapping(&[("t", " T-cell ")]);
    let options = ReconcileOptions::default().with_color(" T-cell ", "#ff0000");
    let result = reconcile_celltypes(&a, &LabelMapping::new(), &options).unwrap();

    let t = result.colors.get("T-cell").unwrap();
    assert_eq!(t.color.to_hex(), "#ff0000");
    assert_eq!(t.source, ColorSource::Override);
    assert_eq!(result.colors.len(), 1);
}

#[test]
fn conflicting_padded_overrides_are_rejected() {
    let (a, b) = sample();
    let options = ReconcileOptions::default()
        .with_color("T-cell", "#ff0000")
        .with_color("T-cell ", "#0000ff");
    let err = reconcile_celltypes(&a, &b, &options).unwrap_err();
    assert!(matches!(err, MapvisError::InvalidMapping { .. }));
}

#[test]
fn invalid_override_fails_before_grouping() {
    let (a, b) = sample();
    let options = ReconcileOptions::default().with_color("T-cell", "red");
    let err = reconcile_celltypes(&a, &b, &options).unwrap_err();
    assert_eq!(
        err,
        MapvisError::ColorFormat {
            label: "T-cell".to_string(),
            value: "red".to_string(),
        }
    );
}

#[test]
fn single_source_rows_are_lightened_and_bold_in_consensus_columns() {
    let a = mapping(&[("x", "Only")]);
    let options = ReconcileOptions::default().with_color("Only", "#000000");
    let result = reconcile_celltypes(&a, &LabelMapping::new(), &options).unwrap();

    let row = &result.table.rows[0];
    assert_eq!(row.cells[0].style.background.to_hex(), "#808080");
    assert_eq!(row.cells[0].style.font, FontStyle::Normal);
    assert_eq!(row.cells[1].style.font, FontStyle::Bold);
    assert_eq!(row.cells[1].style.text, TextColor::White);

    // The legend keeps the unlightened color.
    let legend = result.table.legend.as_ref().unwrap();
    assert_eq!(legend.sections[1].entries[0].color.to_hex(), "#000000");
}

#[test]
fn legend_sections_follow_buckets() {
    let (a, b) = sample();
    let options = ReconcileOptions::default().with_dataset_names("RNA", "ATAC");
    let result = reconcile_celltypes(&a, &b, &options).unwrap();
    let legend = result.table.legend.as_ref().unwrap();

    let titles: Vec<&str> = legend.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["In RNA and ATAC", "Only in RNA", "Only in ATAC"]);
    assert_eq!(legend.entry_count(), 4);
    assert!(legend.sections[1].entries.is_empty());
}

#[test]
fn legend_can_be_disabled() {
    let (a, b) = sample();
    let options = ReconcileOptions::default().with_legend(false);
    let result = reconcile_celltypes(&a, &b, &options).unwrap();
    assert!(result.table.legend.is_none());
}

#[test]
fn repeated_runs_are_identical() {
    let (a, b) = sample();
    let options = ReconcileOptions::default();
    let first = reconcile_celltypes(&a, &b, &options).unwrap();
    let second = reconcile_celltypes(&a, &b, &options).unwrap();
    assert_eq!(first.table, second.table);
    assert_eq!(first.colors, second.colors);
}

#[test]
fn sorting_sorted_groups_is_a_no_op() {
    let (a, b) = sample();
    let result = reconcile_celltypes(&a, &b, &ReconcileOptions::default()).unwrap();
    let mut groups = result.groups.clone();
    sort_groups(&mut groups);
    assert_eq!(groups, result.groups);
}
