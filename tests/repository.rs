use std::fs;

use serde_json::{Value, json};
use tempfile::TempDir;

use adas_repo::{
    BeamEmissionAddress, Element, ErrorKind, Isotope, Level, NdArray, PecAddress, PecClass,
    PecRate, RawRate, Repository, ThermalCxAddress, Transition, UpdateBatch,
};

fn pec(scale: f64) -> RawRate {
    RawRate::new()
        .with("ne", json!([1e19, 1e20]))
        .with("te", json!([1, 10, 100]))
        .with(
            "rate",
            json!([
                [1.0 * scale, 2.0 * scale, 3.0 * scale],
                [4.0 * scale, 5.0 * scale, 6.0 * scale]
            ]),
        )
}

fn thermal_cx() -> RawRate {
    RawRate::new()
        .with("ne", json!([1e19]))
        .with("te", json!([10.0, 100.0]))
        .with("td", json!([1.0, 10.0]))
        .with("rate", json!([[[1.0, 2.0], [3.0, 4.0]]]))
}

fn beam_emission() -> RawRate {
    RawRate::new()
        .with("e", json!([20e3, 40e3]))
        .with("n", json!([1e19, 1e20, 1e21]))
        .with("t", json!([100.0, 1000.0]))
        .with("sen", json!([[1, 2, 3], [4, 5, 6]]))
        .with("st", json!([0.5, 1.0]))
        .with("eref", 40e3)
        .with("nref", 1e20)
        .with("tref", 1000.0)
        .with("sref", 5.0)
}

fn setup() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::new(dir.path());
    (dir, repo)
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn carbon_excitation_is_written_under_lowercase_symbol() {
    let (dir, repo) = setup();
    repo.add_pec_excitation_rate(Element::C, 2, (3u32, 2u32), pec(1.0))
        .unwrap();

    let path = dir.path().join("pec/excitation/c/2.json");
    let doc = read_json(&path);
    let entry = &doc["3 -> 2"];
    assert_eq!(entry["te"], json!([1.0, 10.0, 100.0]));
    assert_eq!(entry["rate"][1][2], json!(6.0));

    let rate = repo
        .get_pec_excitation_rate(Element::C, 2, (3u32, 2u32))
        .unwrap();
    assert_eq!(rate.ne, vec![1e19, 1e20]);
    assert_eq!(rate.rate.shape(), &[2, 3]);
}

#[test]
fn update_merges_without_touching_other_transitions() {
    let (dir, repo) = setup();
    let address = PecAddress::new(PecClass::Excitation, Element::Ne, 9);
    let path = dir.path().join("pec/excitation/ne/9.json");

    let mut batch = UpdateBatch::new();
    batch
        .insert(address, (3u32, 2u32), pec(1.0))
        .insert(address, (4u32, 2u32), pec(2.0));
    repo.update_pec_rates(&batch).unwrap();
    let before = read_json(&path);

    repo.add_pec_excitation_rate(Element::Ne, 9, (3u32, 2u32), pec(10.0))
        .unwrap();
    repo.add_pec_excitation_rate(Element::Ne, 9, (5u32, 2u32), pec(3.0))
        .unwrap();

    let after = read_json(&path);
    assert_eq!(after.as_object().unwrap().len(), 3);
    assert_eq!(after["4 -> 2"], before["4 -> 2"]);
    assert_eq!(after["3 -> 2"]["rate"][0][0], json!(10.0));
}

#[test]
fn keys_are_sorted_and_indented() {
    let (dir, repo) = setup();
    repo.add_pec_recombination_rate(Element::H, 1, (4u32, 2u32), pec(1.0))
        .unwrap();
    repo.add_pec_recombination_rate(Element::H, 1, (3u32, 2u32), pec(1.0))
        .unwrap();

    let text = fs::read_to_string(dir.path().join("pec/recombination/h/1.json")).unwrap();
    assert!(text.starts_with("{\n  \"3 -> 2\": {\n    \"ne\": ["));
    assert!(text.find("\"3 -> 2\"").unwrap() < text.find("\"4 -> 2\"").unwrap());
}

#[test]
fn rewriting_the_same_rate_is_byte_identical() {
    let (dir, repo) = setup();
    let path = dir.path().join("pec/excitation/c/2.json");

    repo.add_pec_excitation_rate(Element::C, 2, (3u32, 2u32), pec(1.0))
        .unwrap();
    let first = fs::read(&path).unwrap();
    repo.add_pec_excitation_rate(Element::C, 2, (3u32, 2u32), pec(1.0))
        .unwrap();
    assert_eq!(fs::read(&path).unwrap(), first);
}

#[test]
fn invalid_entry_leaves_document_unchanged() {
    let (dir, repo) = setup();
    let address = PecAddress::new(PecClass::Excitation, Element::C, 2);
    let path = dir.path().join("pec/excitation/c/2.json");
    repo.add_pec_excitation_rate(Element::C, 2, (3u32, 2u32), pec(1.0))
        .unwrap();
    let before = fs::read(&path).unwrap();

    let bad = pec(1.0).with("rate", json!([[1.0, 2.0], [3.0, 4.0]]));
    let mut batch = UpdateBatch::new();
    batch
        .insert(address, (4u32, 2u32), pec(2.0))
        .insert(address, (5u32, 2u32), bad);
    let err = repo.update_pec_rates(&batch).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn failing_address_does_not_roll_back_earlier_ones() {
    let (dir, repo) = setup();
    let mut batch = UpdateBatch::new();
    batch
        .insert(
            PecAddress::new(PecClass::Excitation, Element::He, 1),
            (3u32, 2u32),
            pec(1.0),
        )
        .insert(
            PecAddress::new(PecClass::Excitation, Element::He, 3),
            (3u32, 2u32),
            pec(1.0),
        );

    let err = repo.update_pec_rates(&batch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert!(dir.path().join("pec/excitation/he/1.json").is_file());
    assert!(!dir.path().join("pec/excitation/he/3.json").exists());
}

#[test]
fn charge_bounds_follow_atomic_number() {
    let (_dir, repo) = setup();
    repo.add_pec_excitation_rate(Element::C, 6, (3u32, 2u32), pec(1.0))
        .unwrap();
    repo.add_pec_excitation_rate(Element::C, 0, (3u32, 2u32), pec(1.0))
        .unwrap();

    let err = repo
        .add_pec_excitation_rate(Element::C, 7, (3u32, 2u32), pec(1.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    // a neutral hydrogen donor is fine, a bare proton has nothing to donate
    repo.add_pec_thermal_cx_rate(Element::H, 0, Element::C, 6, (8u32, 7u32), thermal_cx())
        .unwrap();
    let err = repo
        .add_pec_thermal_cx_rate(Element::H, 1, Element::C, 6, (8u32, 7u32), thermal_cx())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert!(err.to_string().contains("donor"));
}

#[test]
fn missing_file_and_missing_key_are_not_found() {
    let (_dir, repo) = setup();
    let err = repo
        .get_pec_excitation_rate(Element::C, 2, (3u32, 2u32))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("is not available"));

    repo.add_pec_excitation_rate(Element::C, 2, (3u32, 2u32), pec(1.0))
        .unwrap();
    let err = repo
        .get_pec_excitation_rate(Element::C, 2, (4u32, 3u32))
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("4 -> 3"));
}

#[test]
fn corrupt_document_is_an_io_error() {
    let (dir, repo) = setup();
    let path = dir.path().join("pec/excitation/c/2.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{\"3 -> 2\": ").unwrap();

    let err = repo
        .get_pec_excitation_rate(Element::C, 2, (3u32, 2u32))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let err = repo
        .add_pec_excitation_rate(Element::C, 2, (4u32, 2u32), pec(1.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"3 -> 2\": ");
}

#[test]
fn malformed_stored_entry_is_distinct_from_not_found() {
    let (dir, repo) = setup();
    let path = dir.path().join("pec/excitation/c/2.json");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"3 -> 2": {"ne": [1.0], "te": [1.0]}}"#).unwrap();

    let err = repo
        .get_pec_excitation_rate(Element::C, 2, (3u32, 2u32))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!err.is_not_found());
}

#[test]
fn composite_and_labelled_levels_round_trip() {
    let (dir, repo) = setup();
    let transition = Transition::new(Level::from((3u32, 1u32)), Level::from("2s"));
    repo.add_pec_excitation_rate(Element::Li, 1, transition.clone(), pec(1.0))
        .unwrap();

    let doc = read_json(&dir.path().join("pec/excitation/li/1.json"));
    assert!(doc.get("(3, 1) -> 2s").is_some());

    let parsed: Transition = "(3, 1) -> 2s".parse().unwrap();
    assert_eq!(parsed, transition);
    repo.get_pec_excitation_rate(Element::Li, 1, parsed).unwrap();
}

#[test]
fn typed_pec_rate_round_trips_exactly() {
    let (_dir, repo) = setup();
    let rate = PecRate {
        ne: vec![1.234_567_890_123e19, 5e20],
        te: vec![0.1],
        rate: NdArray::from_rows(vec![vec![1.0e-35], vec![7.77e-34]]).unwrap(),
    };
    repo.add_pec_recombination_rate(Element::Ar, 16, (2u32, 1u32), &rate)
        .unwrap();
    let stored = repo
        .get_pec_recombination_rate(Element::Ar, 16, (2u32, 1u32))
        .unwrap();
    assert_eq!(stored, rate);
}

#[test]
fn thermal_cx_and_beam_emission_use_their_own_layouts() {
    let (dir, repo) = setup();

    let mut cx = UpdateBatch::new();
    cx.insert(
        ThermalCxAddress::new(Isotope::DEUTERIUM, 0, Element::Ne, 10),
        (11u32, 10u32),
        thermal_cx(),
    );
    repo.update_pec_thermal_cx_rates(&cx).unwrap();
    assert!(dir.path().join("pec/thermal_cx/d/0/ne/10.json").is_file());

    let mut beam = UpdateBatch::new();
    beam.insert(
        BeamEmissionAddress::new(Element::H, Element::C, 6),
        (3u32, 2u32),
        beam_emission(),
    );
    repo.update_beam_emission_rates(&beam).unwrap();
    assert!(dir.path().join("beam/emission/h/c/6.json").is_file());

    let rate = repo
        .get_beam_emission_rate(Element::H, Element::C, 6, (3u32, 2u32))
        .unwrap();
    assert_eq!(rate.sen.shape(), &[2, 3]);
    assert_eq!(rate.sref, 5.0);

    let cx = repo
        .get_pec_thermal_cx_rate(Isotope::DEUTERIUM, 0, Element::Ne, 10, (11u32, 10u32))
        .unwrap();
    assert_eq!(cx.rate.shape(), &[1, 2, 2]);
}

#[test]
fn beam_emission_rejects_non_scalar_reference() {
    let (_dir, repo) = setup();
    let err = repo
        .add_beam_emission_rate(
            Element::H,
            Element::H,
            1,
            (3u32, 2u32),
            beam_emission().with("eref", json!([40e3])),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("eref"));
}

#[test]
fn leading_zero_label_reads_back_from_its_text_form() {
    let (_dir, repo) = setup();
    let transition = Transition::new(Level::from("03"), 2u32);
    repo.add_pec_excitation_rate(Element::C, 2, transition, pec(1.0))
        .unwrap();

    let parsed: Transition = "03 -> 2".parse().unwrap();
    repo.get_pec_excitation_rate(Element::C, 2, parsed).unwrap();
    assert!(
        repo.get_pec_excitation_rate(Element::C, 2, (3u32, 2u32))
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn unsafe_isotope_symbol_never_leaves_the_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("root");
    let repo = Repository::new(&root);
    let escape = Isotope::new("escape", "../../../escaped", Element::H, 2);

    let err = repo
        .add_pec_excitation_rate(escape, 0, (3u32, 2u32), pec(1.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(!dir.path().join("escaped").exists());
    assert!(!root.exists());

    let err = repo
        .get_pec_excitation_rate(escape, 0, (3u32, 2u32))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[cfg(unix)]
#[test]
fn update_keeps_document_mode() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, repo) = setup();
    let path = dir.path().join("pec/excitation/c/2.json");
    repo.add_pec_excitation_rate(Element::C, 2, (3u32, 2u32), pec(1.0))
        .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    repo.add_pec_excitation_rate(Element::C, 2, (3u32, 2u32), pec(2.0))
        .unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}
