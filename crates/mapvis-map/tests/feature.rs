use mapvis_map::{group_features, reconcile_features};
use mapvis_model::{
    Cardinality, ColorSource, ColumnRole, FeatureRow, FontStyle, MapvisError, Operator,
    ReconcileOptions,
};

fn rows(pairs: &[(&str, &str)]) -> Vec<FeatureRow> {
    pairs
        .iter()
        .map(|(protein, rna)| FeatureRow::new(*protein, *rna))
        .collect()
}

fn mixed() -> Vec<FeatureRow> {
    rows(&[
        ("P1", "R1"),
        ("P2a/P2b", "R2"),
        ("P3", "R3a/R3b"),
        ("P4a/P4b", "R4a/R4b"),
    ])
}

#[test]
fn every_cardinality_is_classified() {
    let result = reconcile_features(&mixed(), &ReconcileOptions::default()).unwrap();

    let summary: Vec<(&str, Cardinality, Operator, Operator)> = result
        .groups
        .iter()
        .map(|g| {
            (
                g.consensus.as_str(),
                g.cardinality,
                g.protein_operator,
                g.rna_operator,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("P3", Cardinality::OneToMany, Operator::None, Operator::Sum),
            ("R1", Cardinality::OneToOne, Operator::None, Operator::None),
            ("R2", Cardinality::ManyToOne, Operator::Max, Operator::None),
            ("R4a", Cardinality::ManyToMany, Operator::Max, Operator::Sum),
        ]
    );
}

#[test]
fn table_cells_carry_operators() {
    let result = reconcile_features(&mixed(), &ReconcileOptions::default()).unwrap();
    let table = &result.table;

    assert_eq!(
        table.column_names(),
        vec!["Protein name", "Operation", "Consensus label", "Operation", "RNA name"]
    );
    assert_eq!(table.caption, "Feature Mapping Table");

    let many = &table.rows[3];
    assert_eq!(many.consensus, "R4a");
    assert_eq!(many.cells[0].values, vec!["P4a", "P4b"]);
    assert_eq!(many.cells[1].values, vec!["max()"]);
    assert_eq!(many.cells[2].values, vec!["R4a"]);
    assert_eq!(many.cells[3].values, vec!["sum()"]);
    assert_eq!(many.cells[4].values, vec!["R4a", "R4b"]);
    assert_eq!(many.cells[1].style.font, FontStyle::Italic);
    assert_eq!(many.cells[2].style.font, FontStyle::Bold);

    let one = &table.rows[1];
    assert!(one.cells[1].is_blank());
    assert!(one.cells[3].is_blank());
    assert_eq!(table.columns[1].role, ColumnRole::Operator);
}

#[test]
fn merged_rows_are_reclassified() {
    let groups = group_features(
        &rows(&[("CD45RA", "PTPRC"), ("CD19", "CD19"), ("CD45RO", "PTPRC")]),
        "/",
    )
    .unwrap();

    assert_eq!(groups.len(), 2);
    let ptprc = &groups[1];
    assert_eq!(ptprc.consensus, "PTPRC");
    assert_eq!(ptprc.proteins, vec!["CD45RA", "CD45RO"]);
    assert_eq!(ptprc.cardinality, Cardinality::ManyToOne);
    assert_eq!(ptprc.protein_operator, Operator::Max);
    assert_eq!(ptprc.source_rows, vec![0, 2]);
}

#[test]
fn merged_group_keeps_its_label() {
    // Both rows land on "P"; the merged 2:3 group would pick "X" on its own.
    let groups = group_features(&rows(&[("P", "X/Y"), ("Q", "P")]), "/").unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].consensus, "P");
    assert_eq!(groups[0].proteins, vec!["P", "Q"]);
    assert_eq!(groups[0].rnas, vec!["X", "Y", "P"]);
    assert_eq!(groups[0].cardinality, Cardinality::ManyToMany);
    assert_eq!(groups[0].rna_operator, Operator::Sum);
}

#[test]
fn duplicate_identifiers_in_a_field_collapse() {
    let groups = group_features(&rows(&[("CD4/CD4", "CD4")]), "/").unwrap();
    assert_eq!(groups[0].cardinality, Cardinality::OneToOne);
    assert_eq!(groups[0].proteins, vec!["CD4"]);
}

#[test]
fn double_delimiter_is_rejected() {
    let err = reconcile_features(
        &rows(&[("CD3", "CD3E//CD3G")]),
        &ReconcileOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MapvisError::AmbiguousGroup { .. }));
}

#[test]
fn blank_rna_field_is_rejected() {
    let err = reconcile_features(
        &rows(&[("P1", "R1"), ("P_Prot_Only/P_Prot_Only2", "")]),
        &ReconcileOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("row 2"), "{err}");
}

#[test]
fn custom_delimiter() {
    let options = ReconcileOptions::default().with_delimiter(";");
    let result = reconcile_features(&rows(&[("A;B", "X")]), &options).unwrap();
    assert_eq!(result.groups[0].cardinality, Cardinality::ManyToOne);

    let whole = ReconcileOptions::default().with_delimiter("");
    let result = reconcile_features(&rows(&[("A/B", "X")]), &whole).unwrap();
    assert_eq!(result.groups[0].cardinality, Cardinality::OneToOne);
    assert_eq!(result.groups[0].proteins, vec!["A/B"]);
}

#[test]
fn overrides_and_legend() {
    let options = ReconcileOptions::default()
        .with_color("R1", "#FF0000")
        .with_color("P3", "#0000FF");
    let result = reconcile_features(&mixed(), &options).unwrap();

    assert_eq!(result.colors.get("R1").unwrap().source, ColorSource::Override);
    assert_eq!(result.colors.color("P3").unwrap().to_hex(), "#0000ff");
    assert_eq!(result.table.rows[0].cells[2].style.background.to_hex(), "#0000ff");

    let legend = result.table.legend.as_ref().unwrap();
    assert_eq!(legend.sections.len(), 1);
    assert_eq!(legend.sections[0].title, "Consensus label");
    let labels: Vec<&str> = legend.sections[0]
        .entries
        .iter()
        .map(|e| e.label.as_str())
        .collect();
    assert_eq!(labels, vec!["P3", "R1", "R2", "R4a"]);
}

#[test]
fn counts_by_cardinality() {
    let result = reconcile_features(&mixed(), &ReconcileOptions::default()).unwrap();
    let counts = result.count_by_cardinality();
    assert_eq!(counts.get("one_to_one"), Some(&1));
    assert_eq!(counts.get("many_to_many"), Some(&1));
    assert!(result.group("R2").is_some());
    assert!(result.group("P2a").is_none());
}

#[test]
fn empty_input_gives_empty_table() {
    let result = reconcile_features(&[], &ReconcileOptions::default()).unwrap();
    assert!(result.table.is_empty());
    assert!(result.table.legend.is_none());
}

#[test]
fn too_many_rows() {
    let options = ReconcileOptions::default().with_max_labels(2);
    let err = reconcile_features(&mixed(), &options).unwrap_err();
    assert!(matches!(
        err,
        MapvisError::InputTooLarge {
            count: 4,
            limit: 2,
            ..
        }
    ));
}
