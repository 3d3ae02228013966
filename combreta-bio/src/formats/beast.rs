//! BEAST 2 XML document for a time-calibrated relaxed-clock analysis
//!
//! The model is fixed: GTR + site model, UPGMA starting tree, log-normal
//! uncorrelated relaxed clock, Gernhard08 birth-death tree prior and one
//! log-normal MRCA calibration. Only the numbers come from [`BeastConfig`].

use crate::alignment::Alignment;
use combreta_core::config::BeastConfig;
use combreta_core::CombretaResult;
use quick_xml::escape::escape;
use std::path::Path;

const NAMESPACE: &str = "beast.pkgmgmt:beast.base.core:beast.base.inference:\
beast.base.evolution.alignment:beast.base.evolution.tree.coalescent:\
beast.base.inference.util:beast.evolution.nuc:beast.base.evolution.operator:\
beast.base.inference.operator:beast.base.evolution.sitemodel:\
beast.base.evolution.substitutionmodel:beast.base.evolution.likelihood";

/// Calibration taxa split by presence in the alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalibrationTaxa {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

impl CalibrationTaxa {
    /// A monophyly constraint needs at least two tips
    pub fn is_usable(&self) -> bool {
        self.present.len() >= 2
    }
}

pub struct BeastDocument<'a> {
    alignment: &'a Alignment,
    params: &'a BeastConfig,
    calibration: CalibrationTaxa,
}

impl<'a> BeastDocument<'a> {
    pub fn new(alignment: &'a Alignment, params: &'a BeastConfig) -> Self {
        let (present, missing): (Vec<String>, Vec<String>) = params
            .calibration_taxa
            .iter()
            .cloned()
            .partition(|name| alignment.contains(name));

        Self {
            alignment,
            params,
            calibration: CalibrationTaxa { present, missing },
        }
    }

    pub fn calibration(&self) -> &CalibrationTaxa {
        &self.calibration
    }

    pub fn render(&self) -> String {
        let p = self.params;
        let mut lines: Vec<String> = vec![
            "<?xml version='1.0' encoding='UTF-8'?>".to_string(),
            "<beast version='2.0'".to_string(),
            format!("       namespace='{}'>", NAMESPACE),
            String::new(),
            "    <!-- ===== SEQUENCE DATA ===== -->".to_string(),
            "    <data id='alignment' dataType='nucleotide'>".to_string(),
        ];

        for taxon in self.alignment.taxa() {
            lines.push(format!("        <sequence taxon='{}'>", escape(taxon.name.as_str())));
            for chunk in taxon.sequence.as_bytes().chunks(p.sequence_width.max(1)) {
                lines.push(format!("            {}", String::from_utf8_lossy(chunk)));
            }
            lines.push("        </sequence>".to_string());
        }
        lines.push("    </data>".to_string());
        lines.push(String::new());

        lines.extend(
            [
                "    <!-- ===== SUBSTITUTION MODEL: GTR ===== -->",
                "    <input spec='GTR' id='gtr'>",
                "        <parameter name='rateAC' value='1.0'/>",
                "        <parameter name='rateAG' value='1.0'/>",
                "        <parameter name='rateAT' value='1.0'/>",
                "        <parameter name='rateCG' value='1.0'/>",
                "        <parameter name='rateCT' value='1.0'/>",
                "        <parameter name='rateGT' value='1.0'/>",
                "        <frequencies id='freqs' spec='Frequencies'>",
                "            <input name='data' idref='alignment'/>",
                "        </frequencies>",
                "    </input>",
                "",
                "    <!-- ===== SITE MODEL ===== -->",
                "    <input spec='SiteModel' id='siteModel'>",
                "        <input name='substModel' idref='gtr'/>",
                "        <parameter name='shape' value='1.0'/>",
                "        <parameter name='proportionInvariant' value='0.0'/>",
                "    </input>",
                "",
                "    <!-- ===== TREE LIKELIHOOD ===== -->",
                "    <input spec='TreeLikelihood' id='treeLikelihood'>",
                "        <input name='data' idref='alignment'/>",
                "        <input name='tree' idref='tree'/>",
                "        <input name='siteModel' idref='siteModel'/>",
                "    </input>",
                "",
                "    <!-- ===== INITIAL TREE ===== -->",
                "    <input spec='beast.base.evolution.tree.ClusterTree' id='tree' clusterType='upgma'>",
                "        <input name='taxa' idref='alignment'/>",
                "    </input>",
                "",
                "    <!-- ===== RELAXED CLOCK: Log-Normal ===== -->",
                "    <input spec='beast.base.evolution.branchratemodel.UCRelaxedClockModel' id='relaxedClock'>",
                "        <input name='tree' idref='tree'/>",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        lines.push(format!(
            "        <parameter name='mean' id='clock.rate' value='{}'/>",
            p.clock_mean
        ));
        lines.push(format!("        <parameter name='stdev' value='{}'/>", p.clock_stdev));
        lines.push(
            "        <distribution spec='LogNormalDistributionModel' meanInRealSpace='true'>"
                .to_string(),
        );
        lines.push(format!("            <parameter name='M' value='{}'/>", p.clock_m));
        lines.push(format!("            <parameter name='S' value='{}'/>", p.clock_s));
        lines.extend(
            [
                "        </distribution>",
                "    </input>",
                "",
                "    <!-- ===== TREE LIKELIHOOD WITH CLOCK ===== -->",
                "    <input spec='TreeLikelihood' id='treeLikelihoodClock'>",
                "        <input name='data' idref='alignment'/>",
                "        <input name='tree' idref='tree'/>",
                "        <input name='siteModel' idref='siteModel'/>",
                "        <input name='branchRateModel' idref='relaxedClock'/>",
                "    </input>",
                "",
                "    <!-- ===== TREE PRIOR: Birth-Death ===== -->",
                "    <input spec='beast.base.evolution.speciation.BirthDeathGernhard08Model' id='birthDeath' tree='@tree'>",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        lines.push(format!(
            "        <parameter name='birthDiffRate' value='{}'/>",
            p.birth_diff_rate
        ));
        lines.push(format!(
            "        <parameter name='relativeDeathRate' value='{}'/>",
            p.relative_death_rate
        ));
        lines.push("    </input>".to_string());
        lines.push(String::new());

        if self.calibration.is_usable() {
            self.push_calibration(&mut lines);
        }

        self.push_run(&mut lines);
        lines.push(String::new());
        lines.push("</beast>".to_string());

        let mut doc = lines.join("\n");
        doc.push('\n');
        doc
    }

    fn push_calibration(&self, lines: &mut Vec<String>) {
        let p = self.params;
        lines.push("    <!-- ===== FOSSIL CALIBRATION: Dilcherocarpon ===== -->".to_string());
        lines.push(format!(
            "    <!-- Crown Combretaceae offset {} Ma (Paleocene-Eocene) -->",
            p.calibration_offset
        ));
        lines.push(format!(
            "    <!-- LogNormal: M={}, S={} (Gilles et al. 2019) -->",
            p.calibration_m, p.calibration_s
        ));
        lines.push(
            "    <distribution id='cal_Dilcherocarpon' monophyletic='true' spec='beast.base.evolution.tree.MRCAPrior' tree='@tree' tipsonly='false'>"
                .to_string(),
        );
        lines.push("        <taxonset id='taxonset_Combretaceae' spec='TaxonSet'>".to_string());
        for taxon in &self.calibration.present {
            lines.push(format!(
                "            <taxon id='{}' spec='Taxon'/>",
                escape(taxon.as_str())
            ));
        }
        lines.push("        </taxonset>".to_string());
        lines.push(format!(
            "        <distr id='LogNormal_Dilcherocarpon' meanInRealSpace='false' offset='{}' spec='beast.base.inference.distribution.LogNormalDistributionModel'>",
            p.calibration_offset
        ));
        lines.push(format!(
            "            <parameter dimension='1' estimate='false' id='RealParameter_M_Dil' name='M' value='{}'/>",
            p.calibration_m
        ));
        lines.push(format!(
            "            <parameter dimension='1' estimate='false' id='RealParameter_S_Dil' lower='0.01' name='S' upper='5.0' value='{}'/>",
            p.calibration_s
        ));
        lines.push("        </distr>".to_string());
        lines.push("    </distribution>".to_string());
        lines.push(String::new());
    }

    fn push_run(&self, lines: &mut Vec<String>) {
        let p = self.params;
        lines.push(format!("    <!-- ===== MCMC: {} ITERATIONS ===== -->", p.chain_length));
        lines.push(format!(
            "    <run spec='MCMC' id='mcmc' chainLength='{}' storeEvery='{}'>",
            p.chain_length, p.store_every
        ));
        lines.extend(
            [
                "        <state>",
                "            <stateNode idref='tree'/>",
                "            <stateNode idref='clock.rate'/>",
                "        </state>",
                "",
                "        <distribution spec='CompoundDistribution' id='posterior'>",
                "            <distribution idref='birthDeath'/>",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        if self.calibration.is_usable() {
            lines.push("            <distribution idref='cal_Dilcherocarpon'/>".to_string());
        }
        lines.extend(
            [
                "            <distribution idref='treeLikelihoodClock'/>",
                "        </distribution>",
                "",
                "        <!-- ===== TREE OPERATORS ===== -->",
                "        <operator spec='ScaleOperator' scaleFactor='0.5' weight='1' name='treeScaler'>",
                "            <tree idref='tree'/>",
                "        </operator>",
                "        <operator spec='Uniform' weight='10' name='uniformRandom'>",
                "            <tree idref='tree'/>",
                "        </operator>",
                "        <operator spec='SubtreeSlide' weight='5' gaussian='true' size='1.0' name='subtreeSlide'>",
                "            <tree idref='tree'/>",
                "        </operator>",
                "        <operator spec='Exchange' isNarrow='true' weight='1' name='narrowExchange'>",
                "            <tree idref='tree'/>",
                "        </operator>",
                "        <operator spec='Exchange' isNarrow='false' weight='1' name='wideExchange'>",
                "            <tree idref='tree'/>",
                "        </operator>",
                "        <operator spec='WilsonBalding' weight='1' name='wilsonBalding'>",
                "            <tree idref='tree'/>",
                "        </operator>",
                "",
                "        <!-- ===== CLOCK RATE OPERATORS ===== -->",
                "        <operator spec='ScaleOperator' scaleFactor='0.75' weight='3' name='rateScaler'>",
                "            <parameter idref='clock.rate'/>",
                "        </operator>",
                "",
                "        <!-- ===== LOGGING ===== -->",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        lines.push(format!(
            "        <logger spec='Logger' logEvery='{}' fileName='{}'>",
            p.log_every,
            escape(p.log_file.as_str())
        ));
        lines.push("            <log idref='posterior'/>".to_string());
        lines.push("            <log idref='clock.rate'/>".to_string());
        lines.push("        </logger>".to_string());
        lines.push(format!(
            "        <logger spec='Logger' logEvery='{}' fileName='{}'>",
            p.log_every,
            escape(p.trees_file.as_str())
        ));
        lines.push("            <log idref='tree'/>".to_string());
        lines.push("        </logger>".to_string());
        lines.push(format!("        <logger spec='Logger' logEvery='{}'>", p.log_every));
        lines.push("            <log idref='posterior'/>".to_string());
        lines.push("        </logger>".to_string());
        lines.push("    </run>".to_string());
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> CombretaResult<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }
}
