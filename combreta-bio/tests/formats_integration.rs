//! Alignment readers and writers working on files
use combreta_bio::alignment::read_alignment;
use combreta_bio::formats::beast::BeastDocument;
use combreta_bio::formats::tnt::{parse_tnt, write_tnt};
use combreta_core::config::BeastConfig;
use combreta_test::{fasta_document, random_dna, TestEnvironment, TestSequence};
use pretty_assertions::assert_eq;
use quick_xml::events::Event;
use quick_xml::Reader;

const TAXA: [&str; 5] = [
    "Laguncularia_racemosa",
    "Conocarpus_erectus",
    "Terminalia_catappa",
    "Buchenavia_tetraphylla",
    "Lythrum_salicaria",
];

fn supermatrix(env: &TestEnvironment, width: usize) -> std::path::PathBuf {
    let records: Vec<TestSequence> = TAXA
        .iter()
        .enumerate()
        .map(|(i, name)| {
            TestSequence::new(*name, random_dna(width, i as u64)).with_description("concatenated")
        })
        .collect();
    env.write_file("supermatrix.fasta", &fasta_document(&records))
        .unwrap()
}

#[test]
fn test_fasta_supermatrix_to_tnt_and_back() {
    let env = TestEnvironment::new().unwrap();
    let input = supermatrix(&env, 120);

    let alignment = read_alignment(&input).unwrap();
    let output = env.root().join("supermatrix.tnt");
    write_tnt(&output, &alignment).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "nstates dna;");
    assert_eq!(lines[1], "xread");
    assert_eq!(lines[2], "120 5");
    assert!(lines[3].starts_with("Laguncularia_racemosa "));
    assert_eq!(&lines[lines.len() - 2..], &[";", "proc/;"]);

    assert_eq!(parse_tnt(&text).unwrap(), alignment);
}

#[test]
fn test_lowercase_mafft_output_survives_tnt_round_trip() {
    let env = TestEnvironment::new().unwrap();
    let input = env
        .write_file(
            "supermatrix.fasta",
            ">Laguncularia_racemosa\nacgt-n\n>Conocarpus_erectus\nacGTtn\n",
        )
        .unwrap();

    let alignment = read_alignment(&input).unwrap();
    assert_eq!(alignment.taxa()[0].sequence, "acgt-n");

    let output = env.root().join("supermatrix.tnt");
    write_tnt(&output, &alignment).unwrap();
    let text = std::fs::read_to_string(&output).unwrap();
    assert!(text.contains("Laguncularia_racemosa acgt-n\n"));

    let parsed = parse_tnt(&text).unwrap();
    assert_eq!(parsed, alignment);
    assert_eq!(parsed.taxa()[1].sequence, "acGTtn");
}

#[test]
fn test_ragged_fasta_rejected() {
    let env = TestEnvironment::new().unwrap();
    let path = env
        .write_file("ragged.fasta", ">a\nACGT\n>b\nACG\n")
        .unwrap();
    let err = read_alignment(&path).unwrap_err();
    assert!(err.to_string().contains("not aligned"));
}

#[test]
fn test_nexus_alignment_to_beast_xml() {
    let env = TestEnvironment::new().unwrap();
    let mut nexus = String::from("#NEXUS\nBEGIN DATA;\nDIMENSIONS NTAX=5 NCHAR=150;\nFORMAT DATATYPE=DNA GAP=-;\nMATRIX\n");
    for (i, name) in TAXA.iter().enumerate() {
        nexus.push_str(&format!("{} {}\n", name, random_dna(150, i as u64)));
    }
    nexus.push_str(";\nEND;\n");
    let path = env.write_file("aligned.nex", &nexus).unwrap();

    let alignment = read_alignment(&path).unwrap();
    assert_eq!(alignment.n_chars(), 150);

    let params = BeastConfig::default();
    let doc = BeastDocument::new(&alignment, &params);
    let output = env.root().join("combretaceae_thesis.xml");
    doc.write(&output).unwrap();

    let xml = std::fs::read_to_string(&output).unwrap();
    let mut reader = Reader::from_str(&xml);
    let mut sequences = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"sequence" => {
                let taxon = e
                    .try_get_attribute("taxon")
                    .unwrap()
                    .map(|a| String::from_utf8_lossy(&a.value).into_owned());
                sequences.push(taxon.unwrap());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    assert_eq!(sequences, TAXA.to_vec());
    assert_eq!(doc.calibration().present.len(), 4);
}
