//! Basic parser and datastructures for known answer tests.
//!
//! A file is an optional `[Key = Value, ...]` header followed by records of
//! `Key = Value` lines, separated by blank lines. `#` starts a comment line.
#![allow(dead_code)]

use std::{collections::HashMap, fs, mem, path::Path};

use sha3_sponge::Bitstring;

pub struct KatSet {
    params: HashMap<String, String>,
    pub tests: Vec<Test>,
}

pub struct Test {
    fields: Vec<(String, String)>,
}

impl KatSet {
    pub fn load(path: &Path) -> Self {
        let content = fs::read_to_string(path).expect("unable to read test file");
        Self::parse(&content)
    }

    fn parse(inp: &str) -> Self {
        let mut params = HashMap::new();
        let mut tests = vec![];
        let mut fields = vec![];
        for line in inp.lines().map(str::trim) {
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() {
                if !fields.is_empty() {
                    tests.push(Test {
                        fields: mem::take(&mut fields),
                    });
                }
                continue;
            }
            if let Some(header) = line.strip_prefix('[') {
                let header = header.strip_suffix(']').expect("missing ']'");
                params.extend(header.split(',').map(key_value));
                continue;
            }
            fields.push(key_value(line));
        }
        if !fields.is_empty() {
            tests.push(Test { fields });
        }
        assert!(!tests.is_empty(), "no test records");
        KatSet { params, tests }
    }

    pub fn param(&self, key: &str) -> &str {
        self.params
            .get(key)
            .unwrap_or_else(|| panic!("missing header parameter {key}"))
    }

    pub fn param_usize(&self, key: &str) -> usize {
        self.param(key)
            .parse()
            .unwrap_or_else(|_| panic!("{key} can't be parsed as usize"))
    }
}

impl Test {
    pub fn get(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing {key}"))
    }

    pub fn usize(&self, key: &str) -> usize {
        self.get(key)
            .parse()
            .unwrap_or_else(|_| panic!("unable to parse {key}"))
    }

    pub fn hex(&self, key: &str) -> Vec<u8> {
        hex::decode(self.get(key)).unwrap_or_else(|_| panic!("unable to decode {key}"))
    }

    /// Message length in bits.
    pub fn len(&self) -> usize {
        self.usize("Len")
    }

    /// Byte-oriented message, `Len` must be a multiple of 8.
    pub fn msg(&self) -> Vec<u8> {
        let len = self.len();
        assert_eq!(0, len % 8);
        let mut msg = self.hex("Msg");
        msg.truncate(len / 8);
        msg
    }

    /// The first `Len` bits of `Msg`.
    pub fn msg_bits(&self) -> Bitstring {
        self.bits("Msg", self.len())
    }

    /// The first `len` bits of hex field `key`.
    pub fn bits(&self, key: &str, len: usize) -> Bitstring {
        Bitstring::from_bytes_with_len(&self.hex(key), len).expect("field shorter than its length")
    }
}

fn key_value(pair: &str) -> (String, String) {
    let (key, value) = pair.split_once('=').expect("missing '='");
    (key.trim().to_owned(), value.trim().to_owned())
}
