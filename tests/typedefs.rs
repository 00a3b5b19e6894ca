//! Golden tests over the JSDoc fixture set in `tests/fixtures`.
//!
//! `typedefs.json` is `jsdoc -X` output for a chain of eight typedefs that
//! inherit from and refer to each other; `documented-script.json` holds a
//! module whose single typedef builds on them.

use std::path::PathBuf;
use typedef_expander::{
    build_index, expand_property, expand_typedef, expand_typedef_with, expand_typedefs, resolve_type_sources,
    DocRecord, ExpandOptions, JsonSource, Kind, Property, RecordSource, TypeRef, TypedefIndex,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name))
}

fn typedef_records() -> Vec<DocRecord> {
    JsonSource.load(&fixture_path("typedefs.json")).unwrap()
}

fn script_records() -> Vec<DocRecord> {
    JsonSource.load(&fixture_path("documented-script.json")).unwrap()
}

fn get<'a>(records: &'a [DocRecord], name: &str) -> &'a DocRecord {
    records
        .iter()
        .find(|r| r.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("fixture has no {name}"))
}

fn names(props: &[Property]) -> Vec<&str> {
    props.iter().filter_map(|p| p.name.as_deref()).collect()
}

fn expanded(name: &str) -> Vec<Property> {
    let records = typedef_records();
    let out = expand_typedef(get(&records, name), &records, &ExpandOptions::default(), &JsonSource).unwrap();
    out.properties.unwrap()
}

/// (typedef, own properties, resolved source properties, fully expanded properties)
const EXPECTED: &[(&str, usize, usize, usize)] = &[
    ("typedefOne", 4, 0, 4),
    ("typedefTwo", 6, 4, 9),
    ("typedefThree", 6, 9, 19),
    ("typedefFour", 5, 15, 33),
    ("typedefFive", 0, 9, 9),
    ("typedefSix", 1, 0, 10),
    ("typedefSeven", 6, 16, 41),
    ("typedefEight", 0, 9, 9),
];

// -- index --

#[test]
fn index_from_auxiliary_file_only() {
    let options = ExpandOptions::with_sources([fixture_path("typedefs.json")]);
    let index = build_index(&[], &options, &JsonSource).unwrap();
    assert_eq!(index.len(), EXPECTED.len());
}

#[test]
fn index_finds_typedefs_in_script() {
    let index = TypedefIndex::from_records(&script_records());
    assert_eq!(index.len(), 1);
    assert!(index.find("typedefNine").is_some());
}

#[test]
fn primary_typedef_shadows_auxiliary() {
    let mut primary = DocRecord::typedef("typedefOne", TypeRef::object(), Some(Vec::new()));
    primary.extra.insert("description".into(), "local override".into());

    let options = ExpandOptions::with_sources([fixture_path("typedefs.json")]);
    let index = build_index(std::slice::from_ref(&primary), &options, &JsonSource).unwrap();

    assert_eq!(index.len(), EXPECTED.len());
    assert_eq!(index.find("typedefOne").unwrap(), &primary);
}

#[test]
fn missing_auxiliary_file_is_an_error() {
    let options = ExpandOptions::with_sources([fixture_path("does-not-exist.json")]);
    let records = typedef_records();
    assert!(build_index(&records, &options, &JsonSource).is_err());
    assert!(expand_typedef(get(&records, "typedefTwo"), &records, &options, &JsonSource).is_err());
}

// -- type resolution --

#[test]
fn resolved_source_counts() {
    let records = typedef_records();
    let index = TypedefIndex::from_records(&records);
    for &(name, _, sources, _) in EXPECTED {
        let props = resolve_type_sources(get(&records, name).type_ref(), &index);
        assert_eq!(props.len(), sources, "resolved sources of {name}");
    }
}

#[test]
fn resolution_does_not_expand_nested_references() {
    let records = typedef_records();
    let index = TypedefIndex::from_records(&records);
    let props = resolve_type_sources(get(&records, "typedefFour").type_ref(), &index);
    let typedef1 = props.iter().find(|p| p.name.as_deref() == Some("typedef1")).unwrap();
    assert_eq!(typedef1.type_ref().unwrap().names, ["fixture-typedefs.typedefOne"]);
    assert!(!names(&props).iter().any(|n| n.contains('.')));
}

// -- property expansion --

#[test]
fn property_expands_to_dotted_names() {
    let records = typedef_records();
    let index = TypedefIndex::from_records(&records);
    let props = expand_property(Property::new("meow", TypeRef::new(["typedefOne"])), Some(&index));
    assert_eq!(
        names(&props),
        ["meow", "meow.item1", "meow.item2", "meow.item3", "meow.item4"]
    );
}

#[test]
fn optional_property_expands_to_optional_children() {
    let records = typedef_records();
    let index = TypedefIndex::from_records(&records);
    let mut meow = Property::new("meow", TypeRef::new(["typedefOne"]));
    meow.optional = Some(true);

    let props = expand_property(meow, Some(&index));
    assert_eq!(props.len(), 5);
    assert!(props.iter().all(Property::is_optional));
}

// -- typedef expansion --

#[test]
fn expanded_counts() {
    let records = typedef_records();
    for &(name, own, _, total) in EXPECTED {
        let record = get(&records, name);
        let own_count = record.properties.as_ref().map_or(0, Vec::len);
        assert_eq!(own_count, own, "own properties of {name}");

        let out = expand_typedef(record, &records, &ExpandOptions::default(), &JsonSource).unwrap();
        assert_eq!(out.properties.unwrap().len(), total, "expanded properties of {name}");
    }
}

#[test]
fn own_property_wins_over_inherited() {
    let props = expanded("typedefTwo");
    assert_eq!(
        names(&props),
        ["item4", "item5", "item6", "item7", "item8", "item9", "item1", "item2", "item3"]
    );
    assert!(props[0].is_optional());
    assert_eq!(props[0].description.as_deref(), Some("item num 4 in typedefTwo is optional"));
}

#[test]
fn later_type_name_wins() {
    // typedefFive is {typedefTwo|typedefOne}: typedefOne's item4 survives
    let five = expanded("typedefFive");
    let item4 = five.iter().find(|p| p.name.as_deref() == Some("item4")).unwrap();
    assert_eq!(item4.description.as_deref(), Some("string item num 4"));
    assert!(item4.optional.is_none());

    // typedefEight is {typedefOne|typedefTwo}: typedefTwo's optional item4 survives
    let eight = expanded("typedefEight");
    let item4 = eight.iter().find(|p| p.name.as_deref() == Some("item4")).unwrap();
    assert_eq!(item4.description.as_deref(), Some("item num 4 in typedefTwo is optional"));
    assert!(item4.is_optional());
}

#[test]
fn optional_reference_propagates_through_expansion() {
    let props = expanded("typedefFour");
    let typedef2: Vec<&Property> = props
        .iter()
        .filter(|p| p.name.as_deref().is_some_and(|n| n.split('.').next() == Some("typedef2")))
        .collect();
    assert_eq!(typedef2.len(), 10);
    assert!(typedef2.iter().all(|p| p.is_optional()));
}

#[test]
fn typedef_four_golden_order() {
    let props = expanded("typedefFour");
    assert_eq!(
        names(&props),
        [
            "object1",
            "object1.item1",
            "object1.item2",
            "object1.item3",
            "typedef2",
            "typedef2.item4",
            "typedef2.item5",
            "typedef2.item6",
            "typedef2.item7",
            "typedef2.item8",
            "typedef2.item9",
            "typedef2.item1",
            "typedef2.item2",
            "typedef2.item3",
            "item10",
            "item11",
            "item12",
            "item13",
            "item14",
            "typedef1",
            "typedef1.item1",
            "typedef1.item2",
            "typedef1.item3",
            "typedef1.item4",
            "item4",
            "item5",
            "item6",
            "item7",
            "item8",
            "item9",
            "item1",
            "item2",
            "item3",
        ]
    );
}

#[test]
fn typedef_seven_golden_order() {
    let props = expanded("typedefSeven");
    let mut expected = vec!["container", "container.name", "container-inherits", "container-inherits.container"];
    let inherited: Vec<String> = (1..=9).map(|i| format!("container-inherits.container.item{i}")).collect();
    expected.extend(inherited.iter().map(String::as_str));
    expected.extend(["item1", "item10", "item11", "item12", "item13", "item14"]);
    expected.extend(["typedef1", "typedef1.item1", "typedef1.item2", "typedef1.item3", "typedef1.item4"]);
    expected.extend(["item4", "item5", "item6", "item7", "item8", "item9", "item2", "item3"]);
    let container: Vec<String> = (1..=9).map(|i| format!("container.item{i}")).collect();
    expected.extend(container.iter().map(String::as_str));

    assert_eq!(names(&props), expected);

    let item1 = props.iter().find(|p| p.name.as_deref() == Some("item1")).unwrap();
    assert_eq!(item1.description.as_deref(), Some("item1 is redeclared in typedef seven"));
}

fn assert_unique(props: &[Property], label: &str) {
    let mut seen = std::collections::HashSet::new();
    let dupes: Vec<_> = props.iter().filter(|p| !seen.insert(p.name.clone())).collect();
    assert!(dupes.is_empty(), "duplicate properties in {label}: {dupes:?}");
}

#[test]
fn expanded_names_are_unique() {
    for &(name, ..) in EXPECTED {
        assert_unique(&expanded(name), name);
    }
}

fn point() -> DocRecord {
    DocRecord::typedef(
        "Point",
        TypeRef::object(),
        Some(vec![
            Property::new("x", TypeRef::new(["number"])),
            Property::new("y", TypeRef::new(["number"])),
        ]),
    )
}

fn declared_origin_x() -> Property {
    Property {
        description: Some("x in shape coordinates".into()),
        ..Property::new("origin.x", TypeRef::new(["number"]))
    }
}

#[test]
fn declared_dotted_property_beats_generated_one() {
    let origin = Property::new("origin", TypeRef::new(["Point"]));
    let after = DocRecord::typedef("Shape", TypeRef::object(), Some(vec![origin.clone(), declared_origin_x()]));
    let before = DocRecord::typedef("Label", TypeRef::object(), Some(vec![declared_origin_x(), origin]));
    let records = vec![point(), after.clone(), before.clone()];

    let props = expand_typedef_with(&after, &records, &[]).properties.unwrap();
    assert_eq!(names(&props), ["origin", "origin.y", "origin.x"]);
    assert_eq!(props[2].description.as_deref(), Some("x in shape coordinates"));

    let props = expand_typedef_with(&before, &records, &[]).properties.unwrap();
    assert_eq!(names(&props), ["origin.x", "origin", "origin.y"]);
    assert_eq!(props[0].description.as_deref(), Some("x in shape coordinates"));
}

#[test]
fn mutually_recursive_typedefs_expand_without_duplicates() {
    let a = DocRecord::typedef(
        "A",
        TypeRef::new(["B"]),
        Some(vec![Property::new("pa", TypeRef::new(["B"]))]),
    );
    let b = DocRecord::typedef(
        "B",
        TypeRef::new(["A"]),
        Some(vec![Property::new("pb", TypeRef::new(["A"]))]),
    );
    let records = vec![a.clone(), b.clone()];

    for (record, first) in [(&a, "pa"), (&b, "pb")] {
        let props = expand_typedef_with(record, &records, &[]).properties.unwrap();
        assert_eq!(props[0].name.as_deref(), Some(first));
        assert!(props.len() > 2);
        assert_unique(&props, first);
    }

    let batch = expand_typedefs(records, &ExpandOptions::default(), &JsonSource).unwrap();
    for record in &batch {
        assert_unique(record.properties.as_deref().unwrap(), "batch");
    }
}

#[test]
fn expansion_leaves_input_untouched() {
    let records = typedef_records();
    let before = records.clone();
    let _ = expand_typedef(get(&records, "typedefSeven"), &records, &ExpandOptions::default(), &JsonSource).unwrap();
    assert_eq!(records, before);
}

#[test]
fn passthrough_fields_survive() {
    let records = typedef_records();
    let out = expand_typedef(get(&records, "typedefThree"), &records, &ExpandOptions::default(), &JsonSource).unwrap();
    assert_eq!(out.extra["memberof"], "fixture-typedefs");
    assert_eq!(out.extra["meta"]["filename"], "typedefs.js");
    assert_eq!(out.longname.as_deref(), Some("fixture-typedefs.typedefThree"));
    assert_eq!(out.type_ref(), Some(&TypeRef::object()));
}

// -- batch expansion --

#[test]
fn batch_matches_single_expansion() {
    let records = typedef_records();
    let out = expand_typedefs(records.clone(), &ExpandOptions::default(), &JsonSource).unwrap();

    assert_eq!(out.len(), records.len());
    for &(name, _, _, total) in EXPECTED {
        assert_eq!(get(&out, name).properties.as_ref().unwrap().len(), total, "{name}");
    }
    // non-typedef records pass through
    assert_eq!(out[0], records[0]);
    assert_eq!(out.last(), records.last());
    // type references are left as written
    assert_eq!(get(&out, "typedefTwo").type_ref().unwrap().names, ["typedefOne"]);
}

#[test]
fn batch_with_auxiliary_typedefs() {
    let options = ExpandOptions::with_sources([fixture_path("typedefs.json")]);
    let out = expand_typedefs(script_records(), &options, &JsonSource).unwrap();

    let typedefs: Vec<&DocRecord> = out.iter().filter(|r| r.kind == Kind::Typedef).collect();
    assert_eq!(typedefs.len(), 1);
    let props = typedefs[0].properties.as_deref().unwrap();
    assert_eq!(props.len(), 9);
    assert_eq!(names(props)[0], "item4");

    // functions are not expanded, their params stay as written
    let func = get(&out, "functionOne");
    assert!(func.properties.is_none());
    assert_eq!(func.extra["params"][0]["type"]["names"][0], "typedefOne");
}

#[test]
fn batch_of_nothing() {
    let out = expand_typedefs(Vec::new(), &ExpandOptions::default(), &JsonSource).unwrap();
    assert!(out.is_empty());
}
