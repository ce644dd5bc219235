//! Reading problem instances into cost matrices.
//!
//! Only explicit edge weights are understood: TSPLIB files with `EDGE_WEIGHT_TYPE: EXPLICIT`
//! and JSON documents carrying the matrix directly.

use clap::ValueEnum;
use ndarray::prelude::*;
use rand::Rng;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{CostMatrix, Error};

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("failed to read instance: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON instance: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("missing TSPLIB keyword {0}")]
    MissingKeyword(&'static str),

    #[error("unsupported {keyword}: {value}")]
    Unsupported {
        keyword: &'static str,
        value: String,
    },

    #[error("expected {expected} edge weights, found {found}")]
    WeightCount { expected: usize, found: usize },

    #[error(transparent)]
    Matrix(#[from] Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceFormat {
    /// TSPLIB with an explicit edge weight section
    Tsplib,
    /// `{"name": "...", "matrix": [[...], ...]}`
    Json,
}

impl InstanceFormat {
    /// `.json` files are JSON, anything else is assumed to be TSPLIB
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some(extension) if extension.eq_ignore_ascii_case("json") => InstanceFormat::Json,
            _ => InstanceFormat::Tsplib,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub name: String,
    pub matrix: CostMatrix,
}

#[derive(Deserialize)]
struct JsonInstance {
    name: Option<String>,
    matrix: Vec<Vec<f64>>,
}

/// Load an instance from a file, guessing the format from the extension when not given.
pub fn load(path: &Path, format: Option<InstanceFormat>) -> Result<Instance, InstanceError> {
    let format = format.unwrap_or_else(|| InstanceFormat::from_path(path));
    info!("Loading {:?} instance from {}", format, path.display());
    let mut instance = parse(BufReader::new(File::open(path)?), format)?;
    if instance.name.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            instance.name = stem.to_owned();
        }
    }
    Ok(instance)
}

pub fn parse<R: Read>(mut reader: R, format: InstanceFormat) -> Result<Instance, InstanceError> {
    match format {
        InstanceFormat::Json => {
            let JsonInstance { name, matrix } = serde_json::from_reader(reader)?;
            Ok(Instance {
                name: name.unwrap_or_default(),
                matrix: CostMatrix::from_rows(matrix)?,
            })
        }
        InstanceFormat::Tsplib => {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            parse_tsplib(&text)
        }
    }
}

/// How the edge weight section enumerates matrix entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeightFormat {
    FullMatrix,
    UpperRow,
    LowerRow,
    UpperDiagRow,
    LowerDiagRow,
}

impl WeightFormat {
    fn parse(value: &str) -> Result<Self, InstanceError> {
        Ok(match value {
            "FULL_MATRIX" => WeightFormat::FullMatrix,
            "UPPER_ROW" => WeightFormat::UpperRow,
            "LOWER_ROW" => WeightFormat::LowerRow,
            "UPPER_DIAG_ROW" => WeightFormat::UpperDiagRow,
            "LOWER_DIAG_ROW" => WeightFormat::LowerDiagRow,
            other => {
                return Err(InstanceError::Unsupported {
                    keyword: "EDGE_WEIGHT_FORMAT",
                    value: other.to_owned(),
                })
            }
        })
    }

    /// Number of weights the section must hold for `n` vertices, [None] on overflow
    fn weight_count(self, n: usize) -> Option<usize> {
        match self {
            WeightFormat::FullMatrix => n.checked_mul(n),
            WeightFormat::UpperRow | WeightFormat::LowerRow => {
                n.checked_mul(n.saturating_sub(1)).map(|count| count / 2)
            }
            WeightFormat::UpperDiagRow | WeightFormat::LowerDiagRow => {
                n.checked_mul(n.checked_add(1)?).map(|count| count / 2)
            }
        }
    }

    /// Matrix positions in the order their weights appear in the file
    fn positions(self, n: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..n).flat_map(move |i| {
            let columns = match self {
                WeightFormat::FullMatrix => 0..n,
                WeightFormat::UpperRow => i + 1..n,
                WeightFormat::LowerRow => 0..i,
                WeightFormat::UpperDiagRow => i..n,
                WeightFormat::LowerDiagRow => 0..i + 1,
            };
            columns.map(move |j| (i, j))
        })
    }

    fn is_triangular(self) -> bool {
        self != WeightFormat::FullMatrix
    }
}

fn is_section_end(line: &str) -> bool {
    line == "EOF" || line.ends_with("_SECTION")
}

fn parse_tsplib(text: &str) -> Result<Instance, InstanceError> {
    let mut header: HashMap<String, String> = HashMap::default();
    let mut lines = text.lines().enumerate();
    let mut has_weight_section = false;

    // Specification part
    for (index, line) in lines.by_ref() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("EDGE_WEIGHT_SECTION") {
            has_weight_section = true;
            break;
        }
        if is_section_end(line) {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(InstanceError::Parse {
                line: index + 1,
                message: format!("expected `KEY : VALUE`, found `{line}`"),
            });
        };
        header.insert(key.trim().to_uppercase(), value.trim().to_owned());
    }

    let name = header.get("NAME").cloned().unwrap_or_default();
    if let Some(kind) = header.get("TYPE") {
        if kind != "TSP" {
            return Err(InstanceError::Unsupported {
                keyword: "TYPE",
                value: kind.clone(),
            });
        }
    }
    let dimension = header
        .get("DIMENSION")
        .ok_or(InstanceError::MissingKeyword("DIMENSION"))?;
    let n = dimension
        .parse::<usize>()
        .map_err(|err| InstanceError::Unsupported {
            keyword: "DIMENSION",
            value: format!("{dimension} ({err})"),
        })?;
    match header.get("EDGE_WEIGHT_TYPE").map(String::as_str) {
        Some("EXPLICIT") => {}
        Some(other) => {
            return Err(InstanceError::Unsupported {
                keyword: "EDGE_WEIGHT_TYPE",
                value: other.to_owned(),
            })
        }
        None => return Err(InstanceError::MissingKeyword("EDGE_WEIGHT_TYPE")),
    }
    let format = WeightFormat::parse(
        header
            .get("EDGE_WEIGHT_FORMAT")
            .ok_or(InstanceError::MissingKeyword("EDGE_WEIGHT_FORMAT"))?,
    )?;
    if !has_weight_section {
        return Err(InstanceError::MissingKeyword("EDGE_WEIGHT_SECTION"));
    }

    // Data part, up to the next section or EOF
    let mut weights = vec![];
    for (index, line) in lines {
        let line = line.trim();
        if is_section_end(line) {
            break;
        }
        for token in line.split_whitespace() {
            weights.push(token.parse::<f64>().map_err(|err| InstanceError::Parse {
                line: index + 1,
                message: format!("bad edge weight `{token}`: {err}"),
            })?);
        }
    }

    // Checked before allocating anything sized by DIMENSION
    let expected = format
        .weight_count(n)
        .ok_or_else(|| InstanceError::Unsupported {
            keyword: "DIMENSION",
            value: format!("{n} (too many edge weights)"),
        })?;
    if expected != weights.len() {
        return Err(InstanceError::WeightCount {
            expected,
            found: weights.len(),
        });
    }
    let mut costs = Array2::zeros((n, n));
    for ((i, j), weight) in format.positions(n).zip(weights) {
        costs[[i, j]] = weight;
        if format.is_triangular() {
            costs[[j, i]] = weight;
        }
    }
    debug!("Parsed {} ({:?}, {} vertices)", name, format, n);

    Ok(Instance {
        name,
        matrix: CostMatrix::new(costs)?,
    })
}

/// A random symmetric metric instance without coordinates.
///
/// Edge weights are drawn uniformly from 1..=100 and then replaced by shortest path
/// distances (Floyd-Warshall), which enforces the triangle inequality.
pub fn random_metric<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<CostMatrix, Error> {
    let mut costs = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in i + 1..n {
            let weight = rng.gen_range(1..=100) as f64;
            costs[[i, j]] = weight;
            costs[[j, i]] = weight;
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through_k = costs[[i, k]] + costs[[k, j]];
                if through_k < costs[[i, j]] {
                    costs[[i, j]] = through_k;
                }
            }
        }
    }
    CostMatrix::new(costs)
}
