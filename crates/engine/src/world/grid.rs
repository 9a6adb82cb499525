use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const GRID_WIDTH: usize = 8;
pub const GRID_HEIGHT: usize = 8;

const SIZE_HEADER_KEYWORD: &str = "size";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Floor,
    Wall,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '0' => Some(Cell::Floor),
            '1' => Some(Cell::Wall),
            _ => None,
        }
    }

    fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Floor),
            1 => Some(Cell::Wall),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed map at {location}: {message}")]
    Format { location: String, message: String },
    #[error(
        "map size mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}"
    )]
    Size {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
}

impl MapError {
    fn format(location: impl Into<String>, message: impl Into<String>) -> Self {
        MapError::Format {
            location: location.into(),
            message: message.into(),
        }
    }

    fn size(actual_width: usize, actual_height: usize) -> Self {
        MapError::Size {
            expected_width: GRID_WIDTH,
            expected_height: GRID_HEIGHT,
            actual_width,
            actual_height,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MapDocument {
    width: usize,
    height: usize,
    cells: Vec<Vec<u8>>,
}

/// Fixed 8x8 wall/floor grid.
///
/// Cells are stored row-major: `cells[y][x]`. Every lookup goes through a bounds check and
/// anything outside the grid reads as [`Cell::Wall`], so the map edge behaves as a solid
/// boundary even when the file leaves it open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: [[Cell; GRID_WIDTH]; GRID_HEIGHT],
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::filled(Cell::Floor)
    }
}

impl OccupancyGrid {
    pub fn filled(cell: Cell) -> Self {
        Self {
            cells: [[cell; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        GRID_WIDTH
    }

    pub fn height(&self) -> usize {
        GRID_HEIGHT
    }

    /// Loads a map file. Files ending in `.json` use the JSON document format, anything else
    /// is read as the text format.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let raw = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&raw)
        } else {
            Self::parse_text(&raw)
        }
    }

    /// Text format: an optional `size W H` header followed by one line per row, `0` for
    /// floor and `1` for wall. Cells may be packed (`01100110`) or separated by whitespace
    /// or commas. Blank lines are ignored.
    pub fn parse_text(raw: &str) -> Result<Self, MapError> {
        let mut declared_size: Option<(usize, usize)> = None;
        let mut rows: Vec<Vec<Cell>> = Vec::new();

        for (index, line) in raw.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let mut tokens = trimmed.split_whitespace();
            if tokens.next() == Some(SIZE_HEADER_KEYWORD) {
                if declared_size.is_some() || !rows.is_empty() {
                    return Err(MapError::format(
                        format!("line {line_number}"),
                        "size header must appear once, before any rows",
                    ));
                }
                declared_size = Some(parse_size_header(tokens, line_number)?);
                continue;
            }

            let mut row = Vec::with_capacity(GRID_WIDTH);
            for (column, symbol) in trimmed.chars().enumerate() {
                if symbol.is_whitespace() || symbol == ',' {
                    continue;
                }
                let cell = Cell::from_symbol(symbol).ok_or_else(|| {
                    MapError::format(
                        format!("line {line_number}, column {}", column + 1),
                        format!("unrecognized cell symbol '{symbol}'"),
                    )
                })?;
                row.push(cell);
            }
            rows.push(row);
        }

        if let Some((width, height)) = declared_size {
            ensure_expected_size(width, height)?;
        }
        Self::from_rows(&rows)
    }

    /// JSON format: `{"width": 8, "height": 8, "cells": [[0, 1, ...], ...]}`.
    pub fn parse_json(raw: &str) -> Result<Self, MapError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let document: MapDocument = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|error| {
                let path = error.path().to_string();
                let source = error.into_inner();
                if path.is_empty() || path == "." {
                    MapError::format("json document", source.to_string())
                } else {
                    MapError::format(format!("json path {path}"), source.to_string())
                }
            })?;

        ensure_expected_size(document.width, document.height)?;

        let mut rows = Vec::with_capacity(document.cells.len());
        for (y, values) in document.cells.iter().enumerate() {
            let row = values
                .iter()
                .enumerate()
                .map(|(x, value)| {
                    Cell::from_value(*value).ok_or_else(|| {
                        MapError::format(
                            format!("json path cells[{y}][{x}]"),
                            format!("unrecognized cell value {value}"),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    fn from_rows(rows: &[Vec<Cell>]) -> Result<Self, MapError> {
        if rows.len() != GRID_HEIGHT {
            let width = rows.first().map_or(0, Vec::len);
            return Err(MapError::size(width, rows.len()));
        }
        let mut grid = Self::default();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != GRID_WIDTH {
                return Err(MapError::size(row.len(), rows.len()));
            }
            grid.cells[y].copy_from_slice(row);
        }
        Ok(grid)
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Cell under a continuous grid coordinate, `None` outside the grid.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        let (cell_x, cell_y) = cell_index(x, y)?;
        self.cell(cell_x, cell_y)
    }

    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        self.cell_at(x, y).map_or(true, Cell::is_wall)
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, cell)| (x, y, *cell)))
    }

    pub fn wall_count(&self) -> usize {
        self.iter_cells().filter(|(_, _, cell)| cell.is_wall()).count()
    }
}

fn cell_index(x: f32, y: f32) -> Option<(usize, usize)> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let (x, y) = (x.floor(), y.floor());
    if x < 0.0 || y < 0.0 {
        return None;
    }
    Some((x as usize, y as usize))
}

fn parse_size_header<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
    line_number: usize,
) -> Result<(usize, usize), MapError> {
    let malformed = || {
        MapError::format(
            format!("line {line_number}"),
            "malformed dimensions, expected `size <width> <height>`",
        )
    };
    let width = tokens
        .next()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    let height = tokens
        .next()
        .and_then(|token| token.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    if tokens.next().is_some() {
        return Err(malformed());
    }
    Ok((width, height))
}

fn ensure_expected_size(width: usize, height: usize) -> Result<(), MapError> {
    if width == GRID_WIDTH && height == GRID_HEIGHT {
        Ok(())
    } else {
        Err(MapError::size(width, height))
    }
}
