use approx::assert_abs_diff_eq;

use ferrite_grow::{
    train_sweep, GrowError, JsonFileStore, MemoryStore, Network, NetworkSnapshot, NetworkStore, Sgd, Topology,
};

fn probe_inputs() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0, 0.0],
        vec![1.0, -1.0, 0.5],
        vec![-0.3, 0.8, 2.0],
        vec![10.0, -7.5, 0.125],
    ]
}

fn trained_network() -> Network {
    let mut net = Network::with_seed(&[3, 4, 2], 17).unwrap();
    let inputs = probe_inputs();
    let targets = vec![vec![0.5, -0.5], vec![-0.2, 0.9], vec![0.0, 0.0], vec![1.0, -1.0]];
    for _ in 0..50 {
        train_sweep(&mut net, &inputs, &targets, &Sgd::new(0.05)).unwrap();
    }
    net
}

fn assert_same_outputs(a: &mut Network, b: &mut Network) {
    for input in probe_inputs() {
        let out_a = a.predict(&input).unwrap();
        let out_b = b.predict(&input).unwrap();
        for (x, y) in out_a.iter().zip(&out_b) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
        }
    }
}

#[test]
fn json_file_round_trip_reproduces_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("models"));
    let mut original = trained_network();
    let name = original.topology().name();

    store.save(&name, &original).unwrap();
    assert!(store.contains("3,4,2"));
    assert!(store.path_for("3,4,2").is_file());

    let mut restored = store.load(&name).unwrap();
    assert_eq!(restored.topology(), original.topology());
    assert_same_outputs(&mut original, &mut restored);
}

#[test]
fn memory_store_round_trip_is_exact() {
    let mut store = MemoryStore::new();
    let mut original = trained_network();
    store.save("3,4,2", &original).unwrap();

    let mut restored = store.load("3,4,2").unwrap();
    assert_eq!(restored.to_snapshot(), original.to_snapshot());
    assert_same_outputs(&mut original, &mut restored);
}

#[test]
fn load_expecting_other_shape_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path());
    store.save("3,4,2", &trained_network()).unwrap();

    let expected = Topology::new(vec![3, 5, 2]).unwrap();
    match store.load_expecting("3,4,2", &expected) {
        Err(GrowError::ShapeMismatchOnLoad { expected, found }) => {
            assert_eq!(expected, vec![3, 5, 2]);
            assert_eq!(found, vec![3, 4, 2]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn restore_keeps_state_on_mismatch() {
    let mut target = Network::with_seed(&[3, 5, 2], 1).unwrap();
    let before = target.to_snapshot();
    let err = target.restore(trained_network().to_snapshot()).unwrap_err();
    assert!(matches!(err, GrowError::ShapeMismatchOnLoad { .. }));
    assert_eq!(target.to_snapshot(), before);
}

#[test]
fn snapshot_layout_is_layer_source_destination() {
    let net = Network::with_seed(&[2, 3, 1], 5).unwrap();
    let snap = net.to_snapshot();
    assert_eq!(snap.layers, vec![2, 3, 1]);
    assert_eq!(snap.weights.len(), 2 * 3 + 3);
    assert_eq!(snap.biases.len(), 3 + 1);

    let first = net.layer(1).unwrap();
    assert_eq!(snap.weights[1 * 3 + 2], first.weights.get(1, 2));
    let second = net.layer(2).unwrap();
    assert_eq!(snap.weights[6 + 2], second.weights.get(2, 0));
}

#[test]
fn corrupted_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let bad = NetworkSnapshot {
        format_version: 1,
        layers: vec![2, 2],
        weights: vec![0.0; 3],
        biases: vec![0.0; 2],
    };
    std::fs::write(store.path_for("2,2"), serde_json::to_string(&bad).unwrap()).unwrap();
    assert!(matches!(store.load("2,2"), Err(GrowError::MalformedSnapshot(_))));

    std::fs::write(store.path_for("junk"), "not json").unwrap();
    assert!(matches!(store.load("junk"), Err(GrowError::Json(_))));
}
