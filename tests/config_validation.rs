//! Startup validation: malformed species documents must abort loading

use std::path::Path;

use mobwar_engine::config::{ConfigRegistry, SpeciesDoc};
use mobwar_engine::core::types::SpeciesId;

#[test]
fn test_shipped_data_directory_loads() {
    let registry = ConfigRegistry::load_dir(Path::new("data")).unwrap();
    assert_eq!(registry.species_count(), 3);
    for name in ["zombie", "skeleton", "piglin"] {
        assert!(registry.get(&SpeciesId::new(name)).is_some(), "missing {}", name);
    }
}

#[test]
fn test_duplicate_species_rejected() {
    let doc = || -> SpeciesDoc {
        serde_json::from_str(
            r#"{
                "species": "creeper",
                "point_system": { "daily_scaling_map": { "0+": 1.0 } },
                "skills": [
                    { "id": "blast", "effect": { "kind": "ability" },
                      "costs": [2], "potency": [ { "radius": 3.0 } ] }
                ]
            }"#,
        )
        .unwrap()
    };
    let err = ConfigRegistry::from_docs(vec![doc(), doc()]).unwrap_err();
    assert_eq!(err.species, "creeper");
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_buy_save_chances_must_sum_to_one() {
    let result = ConfigRegistry::load_str(
        r#"{
            "species": "witch",
            "point_system": {
                "daily_scaling_map": { "0+": 1.0 },
                "buy_chance": 0.8,
                "save_chance": 0.3
            },
            "skills": [
                { "id": "brew", "effect": { "kind": "ability" },
                  "costs": [2], "potency": [ {} ] }
            ]
        }"#,
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("buy_chance"));
}

#[test]
fn test_empty_cost_table_rejected() {
    let result = ConfigRegistry::load_str(
        r#"{
            "species": "witch",
            "point_system": { "daily_scaling_map": { "0+": 1.0 } },
            "skills": [
                { "id": "brew", "effect": { "kind": "ability" },
                  "costs": [], "potency": [] }
            ]
        }"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_missing_potency_rows_rejected() {
    let result = ConfigRegistry::load_str(
        r#"{
            "species": "witch",
            "point_system": { "daily_scaling_map": { "0+": 1.0 } },
            "skills": [
                { "id": "brew", "effect": { "kind": "ability" },
                  "costs": [2, 4], "potency": [ {} ] }
            ]
        }"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_malformed_json_names_the_document() {
    let err = ConfigRegistry::load_str("{ this is not json").unwrap_err();
    assert!(err.to_string().contains("document"));
}
