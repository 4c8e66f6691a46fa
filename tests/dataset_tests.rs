use cfstruct::attributes::acdd::{self, AcddLevel};
use cfstruct::{
    CfDataset, CfStructError, DataType, Dimension, GlobalAttributes, Variable, VariableAttributes,
    VariableType,
};
use ndarray::{Array1, Array2, Array3};

fn grid_dataset() -> CfDataset {
    let mut ds = CfDataset::grid(GlobalAttributes::new());
    ds.add_unlimited_dimension("time", 1).unwrap();
    ds.add_dimension("yc", 3).unwrap();
    ds.add_dimension("xc", 4).unwrap();
    ds
}

fn sic(name: &str, ny: usize, nx: usize) -> Variable {
    Variable::builder()
        .name(name)
        .value(Array3::zeros((1, ny, nx)))
        .dims(["time", "yc", "xc"])
        .variable_type(VariableType::Grid)
        .attributes(VariableAttributes::for_variable("Sea ice concentration").with_grid_mapping("crs"))
        .build()
        .unwrap()
}

#[test]
fn test_constructors_fix_the_data_type() {
    assert_eq!(CfDataset::grid(GlobalAttributes::new()).datatype(), DataType::Grid);
    assert_eq!(
        CfDataset::trajectory(GlobalAttributes::new()).datatype(),
        DataType::Trajectory
    );
    assert!("Swath".parse::<DataType>().is_err());
}

#[test]
fn test_add_variable_and_lookup() {
    let mut ds = grid_dataset();
    ds.add_variable(sic("sea_ice_concentration", 3, 4)).unwrap();

    assert_eq!(ds.variables().len(), 1);
    let by_id = ds.variable_by_id("sic").unwrap();
    assert_eq!(by_id.name(), "sea_ice_concentration");
    assert_eq!(ds.ids().get("sic").map(String::as_str), Some("sea_ice_concentration"));
    assert!(ds.validate().is_ok());
}

#[test]
fn test_undeclared_dimension_is_rejected() {
    let mut ds = grid_dataset();
    let var = Variable::new("depth", Array1::zeros(5), "depth").unwrap();
    let err = ds.add_variable(var).unwrap_err();
    assert!(matches!(err, CfStructError::UnknownDimension { ref dimension, .. } if dimension == "depth"));
}

#[test]
fn test_shape_must_match_declared_sizes() {
    let mut ds = grid_dataset();
    let err = ds.add_variable(sic("sea_ice_concentration", 3, 5)).unwrap_err();
    assert!(matches!(
        err,
        CfStructError::ShapeMismatch { expected: 4, actual: 5, .. }
    ));
}

#[test]
fn test_unlimited_dimension_grows() {
    let mut ds = grid_dataset();
    let var = Variable::new("time", Array1::zeros(7), "time").unwrap();
    ds.add_variable(var).unwrap();
    assert_eq!(ds.dimension("time").unwrap().size, 7);
    assert!(ds.dimension("time").unwrap().unlimited);
}

#[test]
fn test_duplicate_names_and_ids() {
    let mut ds = grid_dataset();
    ds.add_variable(sic("sea_ice_concentration", 3, 4)).unwrap();

    let err = ds.add_variable(sic("sea_ice_concentration", 3, 4)).unwrap_err();
    assert!(matches!(err, CfStructError::Duplicate { kind: "variable", .. }));

    // Different name, same derived id.
    let err = ds.add_variable(sic("sea_ice_cover", 3, 4)).unwrap_err();
    assert!(matches!(err, CfStructError::Duplicate { kind: "variable id", .. }));
}

#[test]
fn test_overwrite_replaces_by_name_and_id() {
    let mut ds = grid_dataset();
    ds.add_variable(sic("sea_ice_concentration", 3, 4)).unwrap();
    ds.add_variable_overwrite(sic("sea_ice_concentration", 3, 4)).unwrap();
    assert_eq!(ds.variables().len(), 1);

    ds.add_variable_overwrite(sic("sea_ice_cover", 3, 4)).unwrap();
    assert_eq!(ds.variables().len(), 1);
    assert_eq!(ds.variable_by_id("sic").unwrap().name(), "sea_ice_cover");
    assert!(ds.variable("sea_ice_concentration").is_none());
    assert!(ds.validate().is_ok());
}

#[test]
fn test_dimension_redeclaration() {
    let mut ds = grid_dataset();
    let err = ds.add_dimension("xc", 10).unwrap_err();
    assert!(matches!(err, CfStructError::Duplicate { kind: "dimension", .. }));
    assert!(ds.add_dimension("not-valid", 1).is_err());

    ds.add_variable(sic("sea_ice_concentration", 3, 4)).unwrap();
    let err = ds.add_dimension_overwrite(Dimension::new("xc", 10)).unwrap_err();
    assert!(matches!(err, CfStructError::ShapeMismatch { .. }));

    ds.add_dimension_overwrite(Dimension::new("xc", 4)).unwrap();
    ds.add_dimension_overwrite(Dimension::new("unused", 2)).unwrap();
    assert_eq!(ds.dimensions().len(), 4);
}

#[test]
fn test_overwrite_cannot_resize_dimension_in_use() {
    let mut ds = grid_dataset();
    ds.add_variable(Variable::new("time", Array1::zeros(7), "time").unwrap())
        .unwrap();
    ds.add_variable(sic("sea_ice_concentration", 3, 4)).unwrap();

    let err = ds
        .add_dimension_overwrite(Dimension::unlimited("time", 1))
        .unwrap_err();
    assert!(matches!(
        err,
        CfStructError::DimensionInUse { size: 7, requested: 1, .. }
    ));
    assert_eq!(ds.dimension("time").unwrap().size, 7);

    let err = ds
        .add_dimension_overwrite(Dimension::unlimited("xc", 99))
        .unwrap_err();
    assert!(matches!(
        err,
        CfStructError::DimensionInUse { ref dimension, size: 4, requested: 99, .. } if dimension == "xc"
    ));
    let xc = ds.dimension("xc").unwrap();
    assert_eq!((xc.size, xc.unlimited), (4, false));

    ds.add_dimension_overwrite(Dimension::unlimited("xc", 4)).unwrap();
    assert!(ds.dimension("xc").unwrap().unlimited);
    ds.add_dimension_overwrite(Dimension::unlimited("time", 7)).unwrap();
    assert!(ds.validate().is_ok());
}

#[test]
fn test_remove_variable() {
    let mut ds = grid_dataset();
    ds.add_variable(sic("sea_ice_concentration", 3, 4)).unwrap();
    let removed = ds.remove_variable("sea_ice_concentration").unwrap();
    assert_eq!(removed.id(), "sic");
    assert!(ds.variable_by_id("sic").is_none());
    assert!(ds.remove_variable("sea_ice_concentration").is_err());
}

#[test]
fn test_summary_lists_structure() {
    let mut ds = grid_dataset();
    ds.global_attributes_mut().set("title", "Daily sea ice").unwrap();
    ds.add_variable(Variable::new("latitude", Array2::zeros((3, 4)), ["yc", "xc"]).unwrap())
        .unwrap();

    let summary = ds.summary();
    assert!(summary.starts_with("Grid dataset"));
    assert!(summary.contains("title: Daily sea ice"));
    assert!(summary.contains("├── time = 1 (unlimited)"));
    assert!(summary.contains("└── latitude [standard] (yc=3, xc=4) latitude"));
}

#[test]
fn test_acdd_report() {
    let mut ds = grid_dataset();
    let report = ds.acdd_report();
    assert!(!report.is_compliant());
    assert_eq!(
        report.missing(AcddLevel::HighlyRecommended),
        vec!["title", "summary", "keywords", "Conventions"]
    );

    let gattrs = ds.global_attributes_mut();
    gattrs.set("title", "Sea ice").unwrap();
    gattrs.set("summary", "Daily sea ice concentration").unwrap();
    gattrs.set("keywords", "sea ice").unwrap();
    acdd::apply_defaults(gattrs).unwrap();
    gattrs.set("time_coverage_duration", "one day").unwrap();

    let report = ds.acdd_report();
    assert!(report.missing(AcddLevel::HighlyRecommended).is_empty());
    assert_eq!(report.malformed().len(), 1);
    assert_eq!(report.malformed()[0].name, "time_coverage_duration");
    assert!(!report.is_compliant());

    ds.global_attributes_mut()
        .set("time_coverage_duration", "P1D")
        .unwrap();
    assert!(ds.acdd_report().is_compliant());
    assert_eq!(
        ds.global_attributes().conventions.as_deref(),
        Some(cfstruct::attributes::DEFAULT_CONVENTIONS)
    );
}

#[test]
fn test_global_netcdf_attributes_default_conventions() {
    let ds = CfDataset::trajectory(GlobalAttributes::new().with("title", "Track").unwrap());
    let attrs = ds.global_attributes().to_netcdf();
    let names: Vec<&str> = attrs.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["title", "Conventions"]);
}
