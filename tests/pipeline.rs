use std::collections::HashSet;

use redstone_sop::{
    CellKind, ConstantFalsePolicy, Exporter, Layout, SynthError, SynthesisConfig, TextRenderer,
    TruthTable, layout::coords, synthesize,
};

fn all_assignments(n: usize) -> Vec<Vec<bool>> {
    (0..1usize << n)
        .map(|x| (0..n).map(|i| (x >> i) & 1 == 1).collect())
        .collect()
}

fn check_exhaustively(table: &TruthTable, layout: &Layout) {
    layout.verify(table, &SynthesisConfig::default()).unwrap();
    for assignment in all_assignments(table.num_inputs()) {
        assert_eq!(
            layout.simulate(&assignment).unwrap(),
            layout.sop().evaluate(&assignment),
            "assignment {:?}",
            assignment
        );
    }
}

fn check_file(path: &str, lit: &[&[bool]]) {
    let table = TruthTable::from_file(path).unwrap();
    let layout = synthesize(&table).unwrap();
    check_exhaustively(&table, &layout);

    for assignment in all_assignments(table.num_inputs()) {
        let expected = lit.contains(&assignment.as_slice());
        assert_eq!(layout.simulate(&assignment).unwrap(), expected);
    }
    assert_eq!(
        layout.grid().count(|k| k == CellKind::LightActuator),
        1,
        "{}",
        path
    );
}

#[test]
fn or_test() {
    check_file(
        "assets/tables/or.tt",
        &[&[true, false], &[false, true], &[true, true]],
    );
}

#[test]
fn and_test() {
    check_file("assets/tables/and.tt", &[&[true, true]]);
}

#[test]
fn xor_test() {
    check_file("assets/tables/xor.tt", &[&[true, false], &[false, true]]);
}

#[test]
fn majority_test() {
    check_file(
        "assets/tables/majority.tt",
        &[
            &[true, true, false],
            &[true, false, true],
            &[false, true, true],
            &[true, true, true],
        ],
    );
    let table = TruthTable::from_file("assets/tables/majority.tt").unwrap();
    let layout = synthesize(&table).unwrap();
    assert_eq!(layout.floors().len(), 4);
    assert_eq!(layout.floor_layers(), coords::total_floor_layers(4));
}

#[test]
fn constant_false_test() {
    let table = TruthTable::from_file("assets/tables/never.tt").unwrap();

    let layout = synthesize(&table).unwrap();
    check_file("assets/tables/never.tt", &[]);
    assert!(layout.floors().is_empty());
    assert_eq!(layout.grid().len(), 2);

    let config = SynthesisConfig::default().with_constant_false(ConstantFalsePolicy::OmitCircuit);
    let layout = Layout::from_table(&table, &config).unwrap();
    assert!(layout.grid().is_empty());
    layout.verify(&table, &config).unwrap();
}

#[test]
fn constant_true_test() {
    let table: TruthTable = "00 1\n10 1\n01 1\n11 1\n".parse().unwrap();
    let layout = synthesize(&table).unwrap();
    assert_eq!(layout.floors().len(), 4);
    check_exhaustively(&table, &layout);
    for assignment in all_assignments(2) {
        assert!(layout.simulate(&assignment).unwrap());
    }
}

#[test]
fn wide_table_test() {
    // 5 inputs, true when the binary number is prime
    let primes = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];
    let rows: Vec<Vec<u8>> = (0..32usize)
        .map(|x| {
            let mut row: Vec<u8> = (0..5).map(|i| ((x >> i) & 1) as u8).collect();
            row.push(u8::from(primes.contains(&x)));
            row
        })
        .collect();
    let table = TruthTable::new(rows).unwrap();
    let layout = synthesize(&table).unwrap();
    assert_eq!(layout.floors().len(), primes.len());
    check_exhaustively(&table, &layout);

    // Reserved bus columns never overlap
    let mut columns = HashSet::new();
    for floor in layout.floors() {
        for c in floor.reserved_columns {
            assert!(columns.insert(c));
        }
    }
}

#[test]
fn row_order_test() {
    // Same function, minterms listed in another order
    let a: TruthTable = "10 1\n01 1\n00 0\n11 0\n".parse().unwrap();
    let b: TruthTable = "01 1\n11 0\n10 1\n00 0\n".parse().unwrap();
    let la = synthesize(&a).unwrap();
    let lb = synthesize(&b).unwrap();
    assert_ne!(la.grid(), lb.grid());
    for assignment in all_assignments(2) {
        assert_eq!(
            la.simulate(&assignment).unwrap(),
            lb.simulate(&assignment).unwrap()
        );
    }
}

#[test]
fn deterministic_render_test() {
    let table = TruthTable::from_file("assets/tables/majority.tt").unwrap();
    let render = || {
        let layout = synthesize(&table).unwrap();
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.export(layout.grid()).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    };
    let first = render();
    assert_eq!(first, render());
    assert!(first.starts_with("Layer 1\n"));
    assert_eq!(first.matches("Layer ").count(), coords::total_floor_layers(4));
}

#[test]
fn invalid_table_test() {
    assert!(matches!(
        "0 1\n1\n".parse::<TruthTable>(),
        Err(SynthError::Table(_))
    ));
    assert!(matches!(
        TruthTable::from_file("assets/tables/or.csv"),
        Err(SynthError::Parser(_))
    ));
}
