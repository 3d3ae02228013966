//! Species and marker tables driving every pipeline stage
//!
//! The built-in catalog is the sampling design of the Laguncularia-Conocarpus
//! monophyly study: 20 species in four functional groups and five markers
//! following Gere et al. (2015) and Tan et al. (2002). A catalog with the same
//! shape can be loaded from TOML to run the pipeline on another clade.

use super::marker::{LengthBounds, Marker, MarkerKind};
use super::taxon::{FunctionalGroup, Species};
use crate::{CombretaError, CombretaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Literature cited in the metadata file
    #[serde(default)]
    pub references: Vec<String>,
    pub species: Vec<Species>,
    pub markers: Vec<Marker>,
}

impl Catalog {
    pub fn load<P: AsRef<Path>>(path: P) -> CombretaResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let catalog: Catalog = toml::from_str(&contents).map_err(|e| {
            CombretaError::Configuration(format!(
                "Failed to parse catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the invariants the file-naming scheme relies on
    pub fn validate(&self) -> CombretaResult<()> {
        if self.species.is_empty() || self.markers.is_empty() {
            return Err(CombretaError::Configuration(
                "catalog needs at least one species and one marker".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for marker in &self.markers {
            // Marker is recovered from file names as the text after the last '_'
            if marker.name.is_empty() || marker.name.contains('_') {
                return Err(CombretaError::Configuration(format!(
                    "invalid marker name '{}': must be non-empty and contain no '_'",
                    marker.name
                )));
            }
            if !seen.insert(marker.name.as_str()) {
                return Err(CombretaError::Configuration(format!(
                    "duplicate marker '{}'",
                    marker.name
                )));
            }
            if marker.queries.is_empty() {
                return Err(CombretaError::Configuration(format!(
                    "marker '{}' has no search queries",
                    marker.name
                )));
            }
            let b = marker.bounds;
            if b.min > b.max || b.optimal < b.min || b.optimal > b.max {
                return Err(CombretaError::Configuration(format!(
                    "marker '{}' has inconsistent length bounds {}/{}/{}",
                    marker.name, b.min, b.optimal, b.max
                )));
            }
        }

        let mut names = HashSet::new();
        for species in &self.species {
            if !names.insert(species.name.as_str()) {
                return Err(CombretaError::Configuration(format!(
                    "duplicate species '{}'",
                    species.name
                )));
            }
        }
        Ok(())
    }

    pub fn marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn marker_names(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(|m| m.name.as_str())
    }

    /// Number of (species, marker) combinations
    pub fn pair_count(&self) -> usize {
        self.species.len() * self.markers.len()
    }

    pub fn builtin() -> Self {
        Self {
            references: vec![
                "Gere et al. (2015). African continent a likely origin of family Combretaceae. \
                 Ann Res Rev Biol 9(1): 1-13."
                    .to_string(),
                "Tan et al. (2002). Phylogenetic relationships of Combretoideae inferred from \
                 plastid and nuclear sequences. J Plant Res 115: 67-76."
                    .to_string(),
            ],
            species: builtin_species(),
            markers: builtin_markers(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_species() -> Vec<Species> {
    use FunctionalGroup::*;

    vec![
        // Mangroves
        Species::new("Laguncularia racemosa", Mangrove)
            .with_notes("Neotropical white mangrove, focal species"),
        Species::new("Conocarpus erectus", Mangrove)
            .with_synonym("Conocarpus erectus var. sericeus")
            .with_notes("Button mangrove, monophyly test with Laguncularia"),
        Species::new("Lumnitzera racemosa", Mangrove)
            .with_notes("Indo-Pacific, potential sister of Laguncularia (Tan 2002)"),
        Species::new("Lumnitzera littorea", Mangrove)
            .with_notes("Indo-Pacific, congener of L. racemosa"),
        // Neotropical terrestrial
        Species::new("Terminalia catappa", NeotropicalTerrestrial)
            .with_notes("Tropical almond, abundant in GenBank"),
        Species::new("Terminalia amazonia", NeotropicalTerrestrial)
            .with_synonym("Terminalia oblonga")
            .with_notes("Amazonia, close relative of T. catappa"),
        Species::new("Buchenavia tetraphylla", NeotropicalTerrestrial)
            .with_notes("Brazil, sister genus of Terminalia"),
        Species::new("Bucida buceras", NeotropicalTerrestrial)
            .with_synonym("Terminalia buceras")
            .with_notes("Caribbean, mangrove-terrestrial transition"),
        Species::new("Combretum fruticosum", NeotropicalTerrestrial)
            .with_notes("Mesoamerica, liana"),
        Species::new("Combretum laxum", NeotropicalTerrestrial)
            .with_notes("South America, relative of C. fruticosum"),
        // Paleotropical terrestrial
        Species::new("Terminalia superba", PaleotropicalTerrestrial)
            .with_notes("West Africa, origin of Combretaceae (Gere 2015)"),
        Species::new("Terminalia mantaly", PaleotropicalTerrestrial)
            .with_notes("Madagascar, Gondwanan evidence"),
        Species::new("Combretum imberbe", PaleotropicalTerrestrial)
            .with_notes("Southern Africa"),
        Species::new("Combretum molle", PaleotropicalTerrestrial)
            .with_notes("Tropical Africa"),
        Species::new("Quisqualis indica", PaleotropicalTerrestrial)
            .with_notes("Asia, basal in Combretaceae (Tan 2002)"),
        Species::new("Calycopteris floribunda", PaleotropicalTerrestrial)
            .with_notes("India, relative of Quisqualis"),
        // Outgroup
        Species::new("Lagerstroemia indica", Outgroup)
            .with_notes("Lythraceae, common ornamental, abundant data"),
        Species::new("Punica granatum", Outgroup)
            .with_notes("Lythraceae, pomegranate, sequenced genome"),
        Species::new("Trapa natans", Outgroup)
            .with_notes("Lythraceae, aquatic, ecological convergence"),
        Species::new("Lawsonia inermis", Outgroup).with_notes("Lythraceae, henna"),
    ]
}

fn builtin_markers() -> Vec<Marker> {
    vec![
        Marker::new("ITS", MarkerKind::Nuclear, LengthBounds::new(300, 1000, 650))
            .with_query("\"internal transcribed spacer\"[Title]")
            .with_query("\"ITS\"[Gene Name] AND \"ribosomal\"[All Fields]")
            .with_query("ITS1[All Fields] OR ITS2[All Fields]")
            .with_reference("Gere 2015, Tan 2002"),
        Marker::new("matK", MarkerKind::PlastidConserved, LengthBounds::new(400, 1500, 850))
            .with_query("\"matK\"[Gene Name]")
            .with_query("\"maturase K\"[All Fields]")
            .with_reference("Gere 2015, Tan 2002, Zhang 2020"),
        Marker::new("rbcL", MarkerKind::PlastidConserved, LengthBounds::new(500, 2000, 1400))
            .with_query("\"rbcL\"[Gene Name]")
            .with_query("\"ribulose bisphosphate carboxylase\"[All Fields]")
            .with_reference("Gere 2015, Tan 2002"),
        Marker::new("psaA-ycf3", MarkerKind::PlastidVariable, LengthBounds::new(300, 1200, 750))
            .with_query("\"psaA\"[Gene Name] AND \"ycf3\"[Gene Name]")
            .with_query("\"psaA-ycf3\"[All Fields]")
            // PY-IGS is the name used by Tan 2002
            .with_query("\"PY-IGS\"[All Fields]")
            .with_reference("Gere 2015, Tan 2002 (PY-IGS)"),
        Marker::new("trnH-psbA", MarkerKind::PlastidVariable, LengthBounds::new(200, 1200, 550))
            .with_query("\"trnH-psbA\"[Gene Name]")
            .with_query("\"trnH\"[Gene Name] AND \"psbA\"[Gene Name]")
            .with_query("\"psbA-trnH\"[All Fields]")
            .with_reference("Gere 2015, Gere 2013 (barcoding)"),
    ]
}
