// Parser for the reference allele files (fasta format)

use anyhow::{anyhow, Context, Result};
use bio::io::fasta;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reference alleles, sorted by name, with their sequence
#[derive(Default, Clone, Debug)]
pub struct ParserReference {
    pub alleles: BTreeMap<String, String>,
}

impl ParserReference {
    pub fn parse<R: Read>(mut reader: R) -> Result<ParserReference> {
        let mut data = String::new();
        reader
            .read_to_string(&mut data)
            .map_err(|e| anyhow!("Invalid fasta format: {}", e))?;
        let (preamble, records) = split_preamble(&data);
        if !preamble.trim().is_empty() {
            log::warn!(
                "Ignoring {} characters before the first fasta header",
                preamble.trim().len()
            );
        }

        let mut pr: ParserReference = Default::default();
        for result in fasta::Reader::new(records.as_bytes()).records() {
            let record = result.map_err(|e| anyhow!("Invalid fasta format: {}", e))?;
            // the full header is the allele name
            let name = match record.desc() {
                Some(desc) => format!("{} {}", record.id(), desc),
                None => record.id().to_string(),
            };
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(anyhow!("Invalid fasta format: empty header"));
            }
            // records without sequence are not alleles
            if record.seq().is_empty() {
                log::debug!("Reference record {} has no sequence, ignored", name);
                continue;
            }
            let seq = String::from_utf8_lossy(record.seq()).to_string();
            if pr.alleles.insert(name.clone(), seq).is_some() {
                log::warn!("Allele {} appears twice in the reference, last one kept", name);
            }
        }
        Ok(pr)
    }

    pub fn parse_str(data: &str) -> Result<ParserReference> {
        ParserReference::parse(data.as_bytes())
    }

    pub fn parse_file(filename: &Path) -> Result<ParserReference> {
        let file = File::open(filename)
            .with_context(|| format!("Unable to open file {}", filename.display()))?;
        ParserReference::parse(file)
            .with_context(|| format!("Error while reading {}", filename.display()))
    }

    /// Allele names, in lexicographic order
    pub fn names(&self) -> Vec<String> {
        self.alleles.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }
}

/// Split the text before the first header line (blank lines, stray
/// sequence) from the records
fn split_preamble(data: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in data.split_inclusive('\n') {
        let content = line.trim_start();
        if content.starts_with('>') {
            return data.split_at(offset + line.len() - content.len());
        }
        offset += line.len();
    }
    data.split_at(offset)
}
