//! Integration tests for configuration and catalog loading
use combreta_core::config::{default_config, load_config, save_config};
use combreta_core::{Catalog, CombretaError, FunctionalGroup};
use combreta_test::TestEnvironment;
use pretty_assertions::assert_eq;

#[test]
fn test_config_file_overrides_defaults() {
    let env = TestEnvironment::new().unwrap();
    let path = env
        .write_file(
            "combreta.toml",
            r#"
[paths]
raw_dir = "downloads"

[entrez]
email = "lab@example.org"
api_key = "0123456789"
retmax = 20

[beast]
chain_length = 10000000
calibration_taxa = ["Laguncularia_racemosa", "Conocarpus_erectus"]
"#,
        )
        .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.paths.raw_dir, "downloads");
    assert_eq!(config.paths.curated_dir, "sequences_curated");
    assert_eq!(config.entrez.retmax, 20);
    assert_eq!(config.entrez.pause().as_millis(), 350);
    assert_eq!(config.beast.chain_length, 10_000_000);
    assert_eq!(config.beast.store_every, 50_000);
    assert_eq!(config.beast.calibration_taxa.len(), 2);
}

#[test]
fn test_config_validation_cases() {
    let env = TestEnvironment::new().unwrap();

    let test_cases = vec![
        ("invalid syntax {{", true),
        ("[curation]\n", false),
        ("[curation]\nline_width = \"wide\"\n", true),
        ("[curation]\nline_width = 0\n", true),
        ("[entrez]\nretmax = 0\n", true),
        ("[beast]\nlog_every = 0\n", true),
        ("[unknown_section]\nkey = 1\n", false),
    ];

    for (i, (content, should_fail)) in test_cases.into_iter().enumerate() {
        let path = env.write_file(format!("case_{}.toml", i), content).unwrap();
        let result = load_config(&path);
        assert_eq!(result.is_err(), should_fail, "case {}: {:?}", i, content);
        if let Err(e) = result {
            assert!(matches!(e, CombretaError::Configuration(_)));
        }
    }
}

#[test]
fn test_missing_config_is_io_error() {
    let env = TestEnvironment::new().unwrap();
    let err = load_config(env.root().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CombretaError::Io(_)));
}

#[test]
fn test_config_save_round_trip() {
    let env = TestEnvironment::new().unwrap();
    let path = env.root().join("saved.toml");

    let mut config = default_config();
    config.curation.max_ambiguous_fraction = 0.1;
    config.beast.calibration_offset = 80.0;
    save_config(&path, &config).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.curation.max_ambiguous_fraction, 0.1);
    assert_eq!(loaded.beast.calibration_offset, 80.0);
    assert_eq!(loaded.beast.calibration_taxa, config.beast.calibration_taxa);
}

#[test]
fn test_custom_catalog_from_toml() {
    let env = TestEnvironment::new().unwrap();
    let path = env
        .write_file(
            "catalog.toml",
            r#"
references = ["Example et al. (2024)"]

[[species]]
name = "Rhizophora mangle"
synonyms = ["Rhizophora samoensis"]
group = "A"
notes = "Red mangrove"

[[species]]
name = "Punica granatum"
group = "D"

[[markers]]
name = "ITS"
queries = ['"internal transcribed spacer"[Title]']
kind = "nuclear"
bounds = { min = 300, max = 1000, optimal = 650 }
"#,
        )
        .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.species.len(), 2);
    assert_eq!(catalog.species[0].synonyms, vec!["Rhizophora samoensis"]);
    assert_eq!(catalog.species[1].group, FunctionalGroup::Outgroup);
    assert!(catalog.species[1].notes.is_empty());
    assert_eq!(catalog.pair_count(), 2);
    assert_eq!(catalog.marker("ITS").unwrap().bounds.optimal, 650);
}

#[test]
fn test_catalog_without_markers_rejected() {
    let env = TestEnvironment::new().unwrap();
    let path = env
        .write_file(
            "catalog.toml",
            "markers = []\n\n[[species]]\nname = \"Trapa natans\"\ngroup = \"D\"\n",
        )
        .unwrap();

    assert!(matches!(
        Catalog::load(&path),
        Err(CombretaError::Configuration(_))
    ));
}
