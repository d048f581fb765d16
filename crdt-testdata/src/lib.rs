//! Helpers for loading recorded real-world editing traces. Used by the catrope tests and
//! benchmarks.
//!
//! A trace is a gzipped JSON file listing every edit a user made while typing a document. Positions
//! and deletion lengths are counted in unicode chars.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use flate2::bufread::GzDecoder;
use serde::Deserialize;

/// (position, delete length, insert content).
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct TestPatch(pub usize, pub usize, pub String);

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct TestTxn {
    // time: String, // ISO String. Unused.
    pub patches: Vec<TestPatch>
}

#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct TestData {
    #[serde(rename = "startContent")]
    pub start_content: String,
    #[serde(rename = "endContent")]
    pub end_content: String,

    pub txns: Vec<TestTxn>,
}

impl TestData {
    /// The number of patches in the trace.
    pub fn len(&self) -> usize {
        self.txns.iter()
            .map(|txn| { txn.patches.len() })
            .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        !self.txns.iter().any(|txn| !txn.patches.is_empty())
    }

    pub fn patches(&self) -> impl Iterator<Item=&TestPatch> {
        self.txns.iter().flat_map(|txn| txn.patches.iter())
    }

    /// Replay the trace on a flat list of chars. This is the slow, obviously-correct version to
    /// check other implementations against.
    pub fn replay_flat(&self) -> String {
        let mut content: Vec<char> = self.start_content.chars().collect();
        for TestPatch(pos, del_len, ins) in self.patches() {
            content.splice(*pos..*pos + *del_len, ins.chars());
        }
        content.into_iter().collect()
    }
}

/// Parse a gzipped trace from any reader.
pub fn parse_testing_data<R: Read>(reader: R) -> io::Result<TestData> {
    // We could pass the GzDecoder straight to serde, but it makes it way slower to parse for
    // some reason.
    let mut reader = GzDecoder::new(BufReader::new(reader));
    let mut raw_json = vec!();
    reader.read_to_end(&mut raw_json)?;

    let data: TestData = serde_json::from_slice(&raw_json)?;
    Ok(data)
}

pub fn load_testing_data<P: AsRef<Path>>(filename: P) -> io::Result<TestData> {
    parse_testing_data(File::open(filename)?)
}
