use std::io::Write;

use pyro_hparams::space::HyperparameterSpace;
use pyro_hparams::{Error, Hyperparameter, ParseError, Value};

const DEFAULT_SPACE: &str = include_str!("../spaces/default.yaml");

fn ints(space: &HyperparameterSpace, name: Hyperparameter) -> Vec<i64> {
    space
        .get(name)
        .unwrap()
        .iter()
        .map(|v| v.as_int().unwrap())
        .collect()
}

fn floats(space: &HyperparameterSpace, name: Hyperparameter) -> Vec<f64> {
    space
        .get(name)
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect()
}

#[test]
fn default_space_parses() {
    let space = HyperparameterSpace::from_yaml_str(DEFAULT_SPACE).unwrap();
    assert_eq!(space.len(), 12);
    assert_eq!(ints(&space, Hyperparameter::Epochs), vec![50, 60, 70]);
    assert_eq!(ints(&space, Hyperparameter::Imgsz), vec![1024]);
    assert_eq!(
        space.get(Hyperparameter::Mixup).unwrap(),
        &[Value::Float(0.0), Value::Float(0.2)]
    );
    assert_eq!(space.get(Hyperparameter::Optimizer).unwrap().len(), 7);
}

#[test]
fn linear_range_with_int_cast() {
    let space = HyperparameterSpace::from_yaml_str(
        "
epochs:
  type: space
  space_type: int
  space_config:
    type: linear
    start: 10
    stop: 50
    num: 5
",
    )
    .unwrap();
    assert_eq!(ints(&space, Hyperparameter::Epochs), vec![10, 20, 30, 40, 50]);
}

#[test]
fn logarithmic_range_is_monotonic_between_bounds() {
    let space = HyperparameterSpace::from_yaml_str(
        "
lr0:
  type: space
  space_type: float
  space_config:
    type: logarithmic
    start: 0.0001
    stop: 0.03
    num: 50
    base: 10
",
    )
    .unwrap();
    let values = floats(&space, Hyperparameter::Lr0);
    assert_eq!(values.len(), 50);
    assert!((values[0] - 0.0001).abs() < 1e-15);
    assert!((values[49] - 0.03).abs() < 1e-15);
    assert!(values.windows(2).all(|w| w[0] < w[1]));

    // Log-even spacing: constant ratio between neighbours.
    let ratio = values[1] / values[0];
    for w in values.windows(2) {
        assert!((w[1] / w[0] - ratio).abs() < 1e-9);
    }
}

#[test]
fn single_point_range_is_start() {
    let space = HyperparameterSpace::from_yaml_str(
        "
translate:
  type: space
  space_type: float
  space_config: {type: linear, start: 0.25, stop: 0.9, num: 1}
",
    )
    .unwrap();
    assert_eq!(floats(&space, Hyperparameter::Translate), vec![0.25]);
}

#[test]
fn unsupported_log_base_is_a_parsing_error() {
    let err = HyperparameterSpace::from_yaml_str(
        "
batch:
  type: array
  array_type: int
  values: [16]
lr0:
  type: space
  space_type: float
  space_config: {type: logarithmic, start: 0.0001, stop: 0.03, num: 50, base: 2}
",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::SpaceParsing(ParseError::UnsupportedRange { ref name, .. }) if name == "lr0"
    ));
}

#[test]
fn unrecognized_key_is_rejected() {
    let err = HyperparameterSpace::from_yaml_str(
        "
batch:
  type: array
  array_type: int
  values: [16, 32]
bogus_param:
  type: array
  array_type: float
  values: [1.0]
",
    )
    .unwrap_err();
    match err {
        Error::SpaceParsing(ParseError::UnrecognizedKeys(keys)) => {
            assert_eq!(keys, vec!["bogus_param".to_owned()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unsupported_entry_kind_is_a_parsing_error() {
    let err = HyperparameterSpace::from_yaml_str(
        "
optimizer:
  type: enum
  values: [SGD]
",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::SpaceParsing(ParseError::UnsupportedEntryKind { .. })
    ));
}

#[test]
fn empty_array_is_an_empty_candidate_set() {
    let err = HyperparameterSpace::from_yaml_str(
        "
optimizer:
  type: array
  array_type: string
  values: []
",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::EmptyCandidateSet {
            name: Hyperparameter::Optimizer
        }
    ));
}

#[test]
fn malformed_yaml_is_a_parsing_error() {
    let err = HyperparameterSpace::from_yaml_str("batch: [unclosed").unwrap_err();
    assert!(matches!(err, Error::SpaceParsing(ParseError::Yaml(_))));
}

#[test]
fn reads_schema_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DEFAULT_SPACE.as_bytes()).unwrap();
    file.flush().unwrap();

    let from_file = HyperparameterSpace::from_yaml_file(file.path()).unwrap();
    let from_str = HyperparameterSpace::from_yaml_str(DEFAULT_SPACE).unwrap();
    assert_eq!(from_file, from_str);
}

#[test]
fn cardinality_is_product_of_candidate_counts() {
    let space = HyperparameterSpace::from_yaml_str(DEFAULT_SPACE).unwrap();
    let expected: u128 = space.iter().map(|(_, c)| c.len() as u128).product();
    assert_eq!(space.cardinality(), expected);
    assert_eq!(
        expected,
        4 * 3 * 10 * 1 * 3 * 7 * 50 * 50 * 2 * 10 * 10 * 10
    );
}

#[test]
fn non_finite_range_bound_is_a_parsing_error() {
    for document in [
        "lr0: {type: space, space_type: float, space_config: {type: linear, start: .nan, stop: 1.0, num: 3}}",
        "lr0: {type: space, space_type: float, space_config: {type: linear, start: 0.0, stop: .inf, num: 3}}",
    ] {
        let err = HyperparameterSpace::from_yaml_str(document).unwrap_err();
        assert!(
            matches!(err, Error::SpaceParsing(ParseError::NonFiniteBounds { ref name, .. }) if name == "lr0"),
            "{document}: {err}"
        );
    }
}

#[test]
fn oversized_range_is_a_parsing_error() {
    let err = HyperparameterSpace::from_yaml_str(
        "epochs: {type: space, space_type: int, space_config: {type: linear, start: 1, stop: 100, num: 18446744073709551615}}",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::SpaceParsing(ParseError::TooManyPoints { ref name, .. }) if name == "epochs"
    ));
}

#[test]
fn negative_int_literals_truncate_toward_zero() {
    let space = HyperparameterSpace::from_yaml_str(
        "degrees: {type: array, array_type: int, values: [-2.9, 2.9, -1]}",
    )
    .unwrap();
    assert_eq!(ints(&space, Hyperparameter::Degrees), vec![-2, 2, -1]);
}
