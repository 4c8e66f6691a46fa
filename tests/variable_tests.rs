use cfstruct::{
    AttributeProfile, CfStructError, CoverageContentType, Dims, FlagVariableAttributes,
    GridVariableAttributes, Variable, VariableAttributes, VariableType,
};
use ndarray::{arr0, Array1, Array2, Array3};

#[test]
fn test_missing_arguments_are_reported() {
    let err = Variable::builder().build().unwrap_err();
    assert!(matches!(err, CfStructError::MissingArgument("name")));

    let err = Variable::builder().name("some_name").build().unwrap_err();
    assert!(matches!(err, CfStructError::MissingArgument("value")));

    let err = Variable::builder()
        .name("some_name")
        .dims("time")
        .build()
        .unwrap_err();
    assert!(matches!(err, CfStructError::MissingArgument("value")));

    let err = Variable::builder()
        .name("some_name")
        .value(Array1::<f64>::zeros(10))
        .build()
        .unwrap_err();
    assert!(matches!(err, CfStructError::MissingArgument("dims")));

    let err = Variable::builder().dims("time").build().unwrap_err();
    assert!(matches!(err, CfStructError::MissingArgument("name")));
}

#[test]
fn test_single_dimension_string_becomes_tuple() {
    let var = Variable::new("some_name", Array1::zeros(10), "time").unwrap();
    assert_eq!(var.dims(), &Dims::from(["time"]));
    assert_eq!(var.dims().len(), 1);
    assert_eq!(var.dim_sizes(), vec![("time", 10)]);
}

#[test]
fn test_rank_must_match_dims() {
    let err = Variable::new("some_name", Array1::zeros(10), ["time", "incorrect_dim"]).unwrap_err();
    assert!(matches!(
        err,
        CfStructError::DimensionMismatch { ndim: 1, ndims: 2, .. }
    ));

    let err = Variable::new("some_name", Array2::zeros((10, 10)), ["time"]).unwrap_err();
    assert!(matches!(
        err,
        CfStructError::DimensionMismatch { ndim: 2, ndims: 1, .. }
    ));
}

#[test]
fn test_scalar_variable() {
    let var = Variable::new("crs", arr0(0.0), Dims::scalar()).unwrap();
    assert_eq!(var.ndim(), 0);
    assert!(var.dim_sizes().is_empty());
}

#[test]
fn test_invalid_explicit_ids() {
    for bad in ["10", "some-var_id", "", "two words"] {
        let err = Variable::builder()
            .name("some_name")
            .value(Array1::zeros(10))
            .dims("time")
            .var_id(bad)
            .build()
            .unwrap_err();
        assert!(
            matches!(err, CfStructError::InvalidIdentifier { .. }),
            "{bad:?} accepted"
        );
    }
}

#[test]
fn test_invalid_dimension_labels() {
    let err = Variable::new("some_name", Array1::zeros(3), "1st").unwrap_err();
    assert!(matches!(err, CfStructError::InvalidIdentifier { .. }));

    let err = Variable::new("some_name", Array2::zeros((3, 3)), ["x", "x"]).unwrap_err();
    assert!(matches!(err, CfStructError::Duplicate { .. }));
}

#[test]
fn test_blank_name_is_rejected() {
    let err = Variable::new("  ", Array1::zeros(3), "time").unwrap_err();
    assert!(matches!(err, CfStructError::InvalidName(_)));
}

#[test]
fn test_derived_id() {
    let var = Variable::new("Sea Ice Concentration", Array2::zeros((2, 2)), ["yc", "xc"]).unwrap();
    assert_eq!(var.id(), "sic");

    let var = Variable::new("time", Array1::zeros(2), "time").unwrap();
    assert_eq!(var.id(), "time");

    let err = Variable::new("10m_wind", Array1::zeros(2), "time").unwrap_err();
    assert!(matches!(err, CfStructError::InvalidIdentifier { .. }));
}

#[test]
fn test_explicit_id_is_kept() {
    let var = Variable::builder()
        .name("some_name")
        .value(Array1::zeros(10))
        .dims("time")
        .var_id("Some_Id")
        .build()
        .unwrap();
    assert_eq!(var.id(), "Some_Id");
}

#[test]
fn test_attributes_default_to_name() {
    let var = Variable::new("some_name", Array1::zeros(10), "time").unwrap();
    assert_eq!(var.attributes(), &VariableAttributes::for_variable("some_name"));
    assert_eq!(var.attributes().long_name, "some_name");
    assert!(var.attributes().units.is_none());
}

#[test]
fn test_flag_variable_requires_flag_attributes() {
    let build = |attrs: VariableAttributes| {
        Variable::builder()
            .name("status_flag")
            .value(Array1::zeros(4))
            .dims("time")
            .variable_type(VariableType::Flag)
            .attributes(attrs)
            .build()
    };

    let err = build(VariableAttributes::for_variable("Status flag")).unwrap_err();
    assert!(matches!(err, CfStructError::InvalidAttribute { ref attribute, .. } if attribute == "flag_values"));

    let mismatched = VariableAttributes::for_variable("Status flag")
        .with_flags(vec![0.0, 1.0], "nominal suspect bad");
    assert!(build(mismatched).is_err());

    let ok = VariableAttributes::for_variable("Status flag")
        .with_flags(vec![0.0, 1.0, 2.0], "nominal suspect bad");
    let var = build(ok).unwrap();
    assert_eq!(var.variable_type(), VariableType::Flag);
}

#[test]
fn test_grid_variable_requires_grid_mapping() {
    let attrs = VariableAttributes::for_variable("Sea ice concentration");
    assert!(GridVariableAttributes::try_from(attrs.clone()).is_err());

    let grid = GridVariableAttributes::try_from(attrs.with_grid_mapping("crs")).unwrap();
    assert_eq!(grid.grid_mapping.as_deref(), Some("crs"));

    let var = Variable::builder()
        .name("sea_ice_concentration")
        .value(Array3::zeros((1, 2, 2)))
        .dims(["time", "yc", "xc"])
        .variable_type(VariableType::Grid)
        .attributes(grid)
        .build()
        .unwrap();
    assert_eq!(var.id(), "sic");
}

#[test]
fn test_flag_attributes_newtype() {
    let attrs = VariableAttributes::for_variable("Surface type")
        .with_flags(vec![0.0, 1.0], "ocean land");
    let flags = FlagVariableAttributes::try_from(attrs).unwrap();
    assert_eq!(flags.flag_meanings.as_deref(), Some("ocean land"));
    assert!(flags.into_inner().validate_as(AttributeProfile::Flag).is_ok());
}

#[test]
fn test_attribute_record_rules() {
    assert!(VariableAttributes::new("").is_err());
    assert!(VariableAttributes::new("Temperature").is_ok());

    let inverted = VariableAttributes::for_variable("Temperature").with_valid_range(10.0, 0.0);
    assert!(inverted.validate().is_err());

    let shadowed = VariableAttributes::for_variable("Temperature").with_attribute("units", "K");
    assert!(shadowed.validate().is_err());

    let fine = VariableAttributes::for_variable("Temperature")
        .with_units("K")
        .with_standard_name("sea_surface_temperature")
        .with_coverage_content_type(CoverageContentType::PhysicalMeasurement)
        .with_attribute("_FillValue", -999.0);
    assert!(fine.validate().is_ok());
}

#[test]
fn test_attributes_from_map() {
    use cfstruct::AttrValue;
    use std::collections::BTreeMap;

    let mut map = BTreeMap::new();
    map.insert("long_name".to_string(), AttrValue::from("Ice flag"));
    map.insert("flag_values".to_string(), AttrValue::Ints(vec![0, 1]));
    map.insert("flag_meanings".to_string(), AttrValue::from("water ice"));
    map.insert("coverage_content_type".to_string(), AttrValue::from("thematicClassification"));
    map.insert("axis".to_string(), AttrValue::from("T"));

    let attrs = VariableAttributes::from_map(&map).unwrap();
    assert_eq!(attrs.flag_values, Some(vec![0.0, 1.0]));
    assert_eq!(
        attrs.coverage_content_type,
        Some(CoverageContentType::ThematicClassification)
    );
    assert_eq!(attrs.other.get("axis"), Some(&AttrValue::from("T")));

    map.insert("units".to_string(), AttrValue::Int(1));
    let err = VariableAttributes::from_map(&map).unwrap_err();
    assert!(matches!(err, CfStructError::InvalidAttribute { ref attribute, .. } if attribute == "units"));

    map.remove("units");
    map.insert("coverage_content_type".to_string(), AttrValue::from("some_str"));
    assert!(VariableAttributes::from_map(&map).is_err());

    map.remove("long_name");
    assert!(VariableAttributes::from_map(&map).is_err());
}

#[test]
fn test_netcdf_attributes_are_ordered() {
    let var = Variable::builder()
        .name("sea_surface_temperature")
        .value(Array1::zeros(3))
        .dims("time")
        .attributes(
            VariableAttributes::for_variable("Sea surface temperature")
                .with_units("K")
                .with_attribute("_FillValue", -999.0),
        )
        .build()
        .unwrap();

    let names: Vec<String> = var.netcdf_attributes().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["long_name", "units", "_FillValue"]);
}

#[test]
fn test_set_value_keeps_rank() {
    let mut var = Variable::new("time", Array1::zeros(3), "time").unwrap();
    var.set_value(Array1::zeros(5)).unwrap();
    assert_eq!(var.shape(), &[5]);
    assert!(var.set_value(Array2::zeros((5, 5))).is_err());
    assert_eq!(var.dim_size("time"), Some(5));
}

#[test]
fn test_set_attributes_revalidates() {
    let mut var = Variable::builder()
        .name("crs")
        .value(arr0(0.0))
        .dims(Dims::scalar())
        .variable_type(VariableType::Flag)
        .attributes(VariableAttributes::for_variable("flag").with_flags(vec![1.0], "one"))
        .build()
        .unwrap();
    assert!(var
        .set_attributes(VariableAttributes::for_variable("flag"))
        .is_err());
    assert_eq!(var.attributes().flag_meanings.as_deref(), Some("one"));
}

#[test]
fn test_variable_type_names() {
    assert_eq!("Flag".parse::<VariableType>().unwrap(), VariableType::Flag);
    assert!("Bogus".parse::<VariableType>().is_err());
}
