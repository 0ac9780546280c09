//! Parsers for the two startup artifacts:
//! - movies.dat: id::title::genres::release_date::vote_average::cast::director::overview
//! - similarity.dat: one matrix row per line, whitespace-separated scores
//!
//! The overview is the last field so it may itself contain `::`.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

const MOVIE_FIELDS: usize = 8;

/// Read a whole artifact into memory, mapping a missing file to `FileNotFound`
fn read_artifact(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.dat file
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let content = read_artifact(path)?;
    parse_movies_str(&content, &file_label(path))
}

/// Parse movie records from already-loaded text.
///
/// `file` is only used for error context.
pub fn parse_movies_str(content: &str, file: &str) -> Result<Vec<MovieRecord>> {
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.splitn(MOVIE_FIELDS, "::").collect();
        if parts.len() != MOVIE_FIELDS {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!(
                    "Expected {} fields but found {}",
                    MOVIE_FIELDS,
                    parts.len()
                ),
            });
        }

        let id = parts[0].trim().parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid movie id: {}", e),
        })?;

        let title = parts[1].trim();
        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing title".to_string(),
            });
        }

        let vote_average = parse_vote_average(parts[4]).map_err(|reason| {
            DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason,
            }
        })?;

        movies.push(MovieRecord {
            id,
            title: title.to_string(),
            genres: parts[2].trim().to_string(),
            release_date: non_empty(parts[3]),
            vote_average,
            cast: parts[5].trim().to_string(),
            director: parts[6].trim().to_string(),
            overview: parts[7].trim().to_string(),
        });
    }

    Ok(movies)
}

/// Parse the similarity.dat file
pub fn parse_similarity_matrix(path: &Path) -> Result<SimilarityMatrix> {
    let content = read_artifact(path)?;
    parse_similarity_str(&content, &file_label(path))
}

/// Parse a similarity matrix from already-loaded text.
///
/// Rows are parsed in parallel; the first bad row (in row order) is reported.
pub fn parse_similarity_str(content: &str, file: &str) -> Result<SimilarityMatrix> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let rows: Vec<Vec<f32>> = lines
        .par_iter()
        .map(|&(idx, line)| parse_score_row(line, file, idx + 1))
        .collect::<Result<Vec<_>>>()?;

    let size = rows.len();
    if let Some((row, found)) = rows
        .iter()
        .enumerate()
        .find(|(_, scores)| scores.len() != size)
        .map(|(row, scores)| (row, scores.len()))
    {
        return Err(DataLoadError::RowLengthMismatch {
            expected: size,
            found,
            row,
        });
    }

    SimilarityMatrix::from_rows(rows).ok_or_else(|| {
        DataLoadError::ValidationError("similarity matrix is not square".to_string())
    })
}

fn parse_score_row(line: &str, file: &str, line_no: usize) -> Result<Vec<f32>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f32>().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid score '{}': {}", token, e),
            })
        })
        .collect()
}

/// Ratings are on a 0-10 scale
fn parse_vote_average(s: &str) -> std::result::Result<f32, String> {
    let value: f32 = s
        .trim()
        .parse()
        .map_err(|e| format!("Invalid vote_average: {}", e))?;
    if !(0.0..=10.0).contains(&value) {
        return Err(format!("vote_average out of range: {}", value));
    }
    Ok(value)
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
