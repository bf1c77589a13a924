use super::*;

fn two_dim() -> Udic {
    Udic::new(vec![
        DimensionInfo::new(64, true, Domain::Time, 2000.0, 125.0, 50.0).with_label("13C"),
        DimensionInfo::new(128, true, Domain::Time, 8000.0, 500.0, 0.0).with_label("1H"),
    ])
    .unwrap()
}

#[test]
fn test_new_rejects_empty() {
    assert!(matches!(Udic::new(Vec::new()), Err(UdicError::Empty)));
}

#[test]
fn test_new_rejects_conflicting_domain_flags() {
    let mut dim = DimensionInfo::new(8, true, Domain::Time, 1000.0, 500.0, 0.0);
    dim.freq = true;
    assert!(matches!(
        Udic::new(vec![dim]),
        Err(UdicError::DomainFlags(0))
    ));
}

#[test]
fn test_new_rejects_zero_size() {
    let dim = DimensionInfo::new(0, false, Domain::Time, 1000.0, 500.0, 0.0);
    assert!(matches!(Udic::new(vec![dim]), Err(UdicError::ZeroSize(0))));
}

#[test]
fn test_swapped_is_a_copy() {
    let udic = two_dim();
    let swapped = udic.swapped(0, 1).unwrap();

    assert_eq!(swapped[0].label, "1H");
    assert_eq!(swapped[1].label, "13C");
    // source untouched
    assert_eq!(udic[0].label, "13C");
    assert_eq!(swapped.swapped(0, 1).unwrap(), udic);
}

#[test]
fn test_with_domain_flips_both_flags() {
    let udic = two_dim().with_domain(1, Domain::Frequency).unwrap();
    assert!(udic[1].freq);
    assert!(!udic[1].time);
    assert_eq!(udic.is_time_domain(), vec![true, false]);
}

#[test]
fn test_out_of_range_dimension() {
    let udic = two_dim();
    assert!(matches!(
        udic.with_complex(2, false),
        Err(UdicError::DimensionOutOfRange { index: 2, ndim: 2 })
    ));
    assert!(udic.get(2).is_none());
}

#[test]
fn test_with_sizes_requires_matching_rank() {
    let udic = two_dim();
    assert_eq!(udic.with_sizes(&[32, 16]).unwrap().sizes(), vec![32, 16]);
    assert!(udic.with_sizes(&[32]).is_err());
}

#[test]
fn test_json_roundtrip_keeps_provenance() {
    let udic = two_dim().with_provenance(OriginalFormat::Bruker, "/data/hsqc/1");
    let json = udic.to_json().unwrap();
    assert!(json.contains("\"Name\""));

    let restored = Udic::from_json(&json).unwrap();
    assert_eq!(restored, udic);
    assert_eq!(restored.original_format, Some(OriginalFormat::Bruker));
}
